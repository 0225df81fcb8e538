//! Test helpers module
//!
//! Utilities shared by the integration tests: a scripted interaction port and
//! one-time logging setup.

#![allow(dead_code)]

pub mod scripted_port;

pub use scripted_port::*;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}
