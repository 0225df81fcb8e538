//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for flow runs.

use tracing::{info, warn, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{StepFlowError, Result};

/// Initialize logging based on configuration
///
/// Log lines go to stderr so they never interleave with prompts written to stdout.
/// The returned guard flushes the file appender on drop and must be held for the
/// lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| StepFlowError::Config(format!("Invalid log filter {}: {}", config.level, e)))?;

    let console_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "stepflow.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(filter)
        .try_init()
        .map_err(|e| StepFlowError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a step render call
pub fn log_step_rendered(run_id: &str, step_id: &str, index: usize, has_controls: bool) {
    debug!(
        run_id = run_id,
        step_id = step_id,
        index = index,
        has_controls = has_controls,
        "Step rendered"
    );
}

/// Log an answer collected from the interaction port
///
/// The answer text itself is only recorded when `include_text` is set.
pub fn log_answer_collected(run_id: &str, step_id: &str, answer: &str, include_text: bool) {
    if include_text {
        debug!(run_id = run_id, step_id = step_id, answer = answer, "Answer collected");
    } else {
        debug!(run_id = run_id, step_id = step_id, answer_len = answer.len(), "Answer collected");
    }
}

/// Log an index transition
pub fn log_transition(run_id: &str, step_id: &str, from: usize, to: Option<usize>, reason: &str) {
    info!(
        run_id = run_id,
        step_id = step_id,
        from = from,
        to = ?to,
        reason = reason,
        "Flow transition"
    );
}

/// Log a step whose controls matched no known interaction kind
pub fn log_stall(run_id: &str, step_id: &str, index: usize) {
    warn!(
        run_id = run_id,
        step_id = step_id,
        index = index,
        "No interaction kind matched the step controls, run cannot make progress"
    );
}

/// Log the end of a run
pub fn log_run_finished(run_id: &str, status: &str, iterations: usize, duration_ms: i64) {
    info!(
        run_id = run_id,
        status = status,
        iterations = iterations,
        duration_ms = duration_ms,
        "Flow run finished"
    );
}
