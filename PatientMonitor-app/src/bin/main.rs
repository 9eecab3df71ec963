use dotenv::dotenv;
use tracing::info;

use patient_monitor_app::{create_alert_service, init_tracing, run_demo, MonitorConfig};

/// The main entry point for the PatientMonitor demo
///
/// This function:
/// 1. Initializes environment variables from .env file
/// 2. Reads the configuration
/// 3. Sets up tracing for logging
/// 4. Runs the demo checks through the configured alert channel
fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    let config = MonitorConfig::from_env()?;
    init_tracing(&config.log_filter);

    info!("Starting PatientMonitor with {:?} alerts", config.alert_channel);

    let alert_service = create_alert_service(config.alert_channel);
    let summary = run_demo(alert_service)?;

    info!(
        "Finished {} checks across {} patients",
        summary.checks, summary.patients
    );
    Ok(())
}
