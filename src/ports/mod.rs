//! Interaction port implementations
//!
//! Hosting environments plug one of these into the flow runner.

pub mod console;

pub use console::ConsolePort;
