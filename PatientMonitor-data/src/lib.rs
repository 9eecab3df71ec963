// PatientMonitor Data
// This crate owns patient records and the directory used to look them up

// Storage models
pub mod models;

// Repository implementations for data access
pub mod repository;

// Re-export commonly used types
pub use models::{BloodPressure, HealthInfo, NewPatientRequest, PatientInfo, Temperature};
pub use repository::{PatientDirectory, PatientRepository, RepositoryError};
