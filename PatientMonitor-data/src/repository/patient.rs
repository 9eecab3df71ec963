use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::models::patient::{NewPatientRequest, PatientInfo};
use crate::models::temperature::Temperature;
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;

/// Lowest normal temperature accepted when registering a patient
const MIN_NORMAL_TEMPERATURE: Temperature = Temperature::from_millidegrees(30_000);

/// Highest normal temperature accepted when registering a patient
const MAX_NORMAL_TEMPERATURE: Temperature = Temperature::from_millidegrees(45_000);

/// Lookup of patient records by id
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait PatientDirectory {
    /// Get the current record for a patient.
    /// Fails with `RepositoryError::NotFound` when the id is unknown.
    fn get_by_id(&self, id: &str) -> Result<PatientInfo, RepositoryError>;
}

impl<T: PatientDirectory + ?Sized> PatientDirectory for &T {
    fn get_by_id(&self, id: &str) -> Result<PatientInfo, RepositoryError> {
        (**self).get_by_id(id)
    }
}

impl<T: PatientDirectory + ?Sized> PatientDirectory for Arc<T> {
    fn get_by_id(&self, id: &str) -> Result<PatientInfo, RepositoryError> {
        (**self).get_by_id(id)
    }
}

impl<T: PatientDirectory + ?Sized> PatientDirectory for Box<T> {
    fn get_by_id(&self, id: &str) -> Result<PatientInfo, RepositoryError> {
        (**self).get_by_id(id)
    }
}

/// Repository for patient records held in memory
#[derive(Debug, Clone, Default)]
pub struct PatientRepository {
    storage: InMemoryStorage,
}

impl PatientRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self {
            storage: InMemoryStorage::new(),
        }
    }

    /// Register a new patient under a freshly generated id
    pub fn add(&self, request: NewPatientRequest) -> Result<PatientInfo, RepositoryError> {
        validate_request(&request)?;

        let patient = request.into_patient(Uuid::new_v4().to_string());
        self.storage.insert(patient.clone())?;
        debug!("Registered patient {}", patient.id);

        Ok(patient)
    }

    /// Store a patient under the id it already carries
    pub fn insert(&self, patient: PatientInfo) -> Result<(), RepositoryError> {
        let id = patient.id.clone();
        self.storage.insert(patient)?;
        debug!("Stored patient {}", id);
        Ok(())
    }

    /// Replace an existing patient record, returning the previous one
    pub fn update(&self, patient: PatientInfo) -> Result<PatientInfo, RepositoryError> {
        let id = patient.id.clone();
        match self.storage.replace(patient)? {
            Some(previous) => {
                debug!("Updated patient {}", id);
                Ok(previous)
            }
            None => {
                debug!("Cannot update unknown patient {}", id);
                Err(RepositoryError::NotFound(id))
            }
        }
    }

    /// Remove a patient, returning the removed record
    pub fn remove(&self, id: &str) -> Result<PatientInfo, RepositoryError> {
        match self.storage.remove(id)? {
            Some(removed) => {
                debug!("Removed patient {}", id);
                Ok(removed)
            }
            None => {
                debug!("Cannot remove unknown patient {}", id);
                Err(RepositoryError::NotFound(id.to_string()))
            }
        }
    }

    /// Number of registered patients
    pub fn len(&self) -> Result<usize, RepositoryError> {
        self.storage.len()
    }

    /// Whether no patients are registered
    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }
}

impl PatientDirectory for PatientRepository {
    fn get_by_id(&self, id: &str) -> Result<PatientInfo, RepositoryError> {
        self.storage.get(id)?.ok_or_else(|| {
            debug!("Patient {} not found", id);
            RepositoryError::NotFound(id.to_string())
        })
    }
}

/// Validate a registration request
fn validate_request(request: &NewPatientRequest) -> Result<(), RepositoryError> {
    if let Err(validation_errors) = request.validate() {
        // Flatten field errors into a single readable message, ordered by field
        let mut field_errors: Vec<_> = validation_errors.field_errors().into_iter().collect();
        field_errors.sort_by_key(|(field, _)| *field);

        let error_message = field_errors
            .iter()
            .map(|(field, errors)| {
                let error_msgs: Vec<String> = errors
                    .iter()
                    .map(|err| match &err.message {
                        Some(msg) => msg.to_string(),
                        None => format!("Invalid {}", field),
                    })
                    .collect();
                format!("{}: {}", field, error_msgs.join(", "))
            })
            .collect::<Vec<String>>()
            .join("; ");

        return Err(RepositoryError::Validation(error_message));
    }

    if request.systolic <= request.diastolic {
        return Err(RepositoryError::Validation(
            "Systolic pressure must be greater than diastolic pressure".to_string(),
        ));
    }

    if request.normal_temperature < MIN_NORMAL_TEMPERATURE
        || request.normal_temperature > MAX_NORMAL_TEMPERATURE
    {
        return Err(RepositoryError::Validation(format!(
            "Normal temperature must be between {} and {}",
            MIN_NORMAL_TEMPERATURE, MAX_NORMAL_TEMPERATURE
        )));
    }

    Ok(())
}
