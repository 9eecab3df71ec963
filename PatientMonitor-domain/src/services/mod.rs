pub mod alert;
pub mod medical;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and implementations
pub use alert::{LoggingAlertService, SendAlertService, StdoutAlertService};
pub use medical::{alert_message, MedicalService, MedicalServiceError, MedicalServiceTrait};

// Re-export generated doubles when the mock feature is enabled
#[cfg(feature = "mock")]
pub use alert::MockSendAlertService;
