// PatientMonitor Domain
// This crate contains the vital sign checks and the alert channels they report to

// Services that implement business logic
pub mod services;

// Re-export the data layer for convenience
pub use patient_monitor_data as data;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
