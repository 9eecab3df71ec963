// Patient models and value types
pub mod patient;
pub mod temperature;

// Re-export common types for easier imports
pub use patient::{BloodPressure, HealthInfo, NewPatientRequest, PatientInfo};
pub use temperature::{Temperature, TemperatureParseError};
