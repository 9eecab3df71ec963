// Repository module structure
pub mod errors;
mod in_memory;
mod patient;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use in_memory::InMemoryStorage;
pub use patient::{PatientDirectory, PatientRepository};

// Re-export the generated directory double for tests and the mock feature
#[cfg(any(test, feature = "mock"))]
pub use patient::MockPatientDirectory;
