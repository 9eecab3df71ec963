// PatientMonitor App
// Configuration, logging setup and the demo run behind the patient_monitor binary

pub mod config;
pub mod demo;
pub mod logging;

pub use config::{create_alert_service, AlertChannel, ConfigError, MonitorConfig};
pub use demo::{run_demo, DemoError, DemoSummary};
pub use logging::init_tracing;
