//! StepFlow console runner
//!
//! Runs the first meeting scenario against the terminal.

use std::sync::Arc;
use tracing::{info, error};

use stepflow::{
    config::Settings,
    flow::FlowRunner,
    ports::ConsolePort,
    scenarios,
    utils::logging,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", stepflow::info());

    let provider = scenarios::first_meeting()?;
    let port = Arc::new(ConsolePort::stdio(settings.console.clone()));
    let runner = FlowRunner::new(provider, port).with_config(settings.flow.clone());

    match runner.run().await {
        Ok(report) => {
            info!(status = report.status.as_str(), "Conversation finished");
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, severity = %e.severity(), "Conversation aborted");
            Err(e.into())
        }
    }
}
