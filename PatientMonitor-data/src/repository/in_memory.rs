use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::models::patient::PatientInfo;
use super::errors::RepositoryError;

/// In-memory storage for patient records
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    /// Patients keyed by id
    patients: Arc<RwLock<HashMap<String, PatientInfo>>>,
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a patient, refusing to overwrite an existing id
    pub fn insert(&self, patient: PatientInfo) -> Result<(), RepositoryError> {
        let mut store = self.patients.write()?;
        if store.contains_key(&patient.id) {
            return Err(RepositoryError::Duplicate(patient.id));
        }
        store.insert(patient.id.clone(), patient);
        Ok(())
    }

    /// Get a copy of a patient by id
    pub fn get(&self, id: &str) -> Result<Option<PatientInfo>, RepositoryError> {
        let store = self.patients.read()?;
        Ok(store.get(id).cloned())
    }

    /// Replace an existing patient, returning the previous record.
    /// Nothing is stored when the id is unknown.
    pub fn replace(&self, patient: PatientInfo) -> Result<Option<PatientInfo>, RepositoryError> {
        let mut store = self.patients.write()?;
        match store.get_mut(&patient.id) {
            Some(existing) => Ok(Some(std::mem::replace(existing, patient))),
            None => Ok(None),
        }
    }

    /// Remove a patient by id
    pub fn remove(&self, id: &str) -> Result<Option<PatientInfo>, RepositoryError> {
        let mut store = self.patients.write()?;
        Ok(store.remove(id))
    }

    /// Number of stored patients
    pub fn len(&self) -> Result<usize, RepositoryError> {
        let store = self.patients.read()?;
        Ok(store.len())
    }
}
