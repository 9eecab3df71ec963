// Testing utilities and doubles for the domain layer
// This module is only available when the "mock" feature is enabled

// Re-export generated doubles from both layers
pub use patient_monitor_data::repository::MockPatientDirectory;
pub use crate::services::alert::MockSendAlertService;

use std::sync::RwLock;

use chrono::NaiveDate;
use patient_monitor_data::models::{BloodPressure, HealthInfo, PatientInfo, Temperature};
use crate::services::alert::SendAlertService;

/// Alert service that keeps every message it is asked to send
#[derive(Debug, Default)]
pub struct RecordingAlertService {
    messages: RwLock<Vec<String>>,
}

impl RecordingAlertService {
    /// Create a new recorder with no messages
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.messages.read().unwrap().clone()
    }

    /// Number of messages received so far
    pub fn count(&self) -> usize {
        self.messages.read().unwrap().len()
    }
}

impl SendAlertService for RecordingAlertService {
    fn send(&self, message: &str) {
        self.messages.write().unwrap().push(message.to_string());
    }
}

/// Build a patient with the given baseline and placeholder personal details
pub fn patient_with_baseline(
    id: &str,
    normal_temperature: Temperature,
    blood_pressure: BloodPressure,
) -> PatientInfo {
    PatientInfo::new(
        id,
        "Test",
        "Patient",
        NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
        HealthInfo::new(normal_temperature, blood_pressure),
    )
}

/// Build a directory double that serves one patient and reports every other id as missing
pub fn directory_serving(patient: PatientInfo) -> MockPatientDirectory {
    let mut directory = MockPatientDirectory::new();
    directory.expect_get_by_id().returning(move |id| {
        if id == patient.id {
            Ok(patient.clone())
        } else {
            Err(patient_monitor_data::RepositoryError::NotFound(id.to_string()))
        }
    });
    directory
}
