use thiserror::Error;

use patient_monitor_data::models::{BloodPressure, HealthInfo, Temperature};
use patient_monitor_data::repository::{PatientDirectory, RepositoryError};
use crate::services::alert::SendAlertService;

/// A temperature this far or further below normal, exclusive, raises an alert
pub const TEMPERATURE_DROP_LIMIT: Temperature = Temperature::from_millidegrees(1_500);

/// Medical service errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MedicalServiceError {
    /// No patient is registered under the id
    #[error("Patient not found: {0}")]
    NotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Trait for checking readings against a patient's baseline
pub trait MedicalServiceTrait {
    /// Alert when either half of the reading differs from the patient's normal blood pressure
    fn check_blood_pressure(&self, id: &str, reading: BloodPressure) -> Result<(), MedicalServiceError>;

    /// Alert when the reading is more than 1.5 degrees below the patient's normal temperature.
    ///
    /// Readings above normal never alert.
    fn check_temperature(&self, id: &str, reading: Temperature) -> Result<(), MedicalServiceError>;
}

/// Format the warning sent for a patient
pub fn alert_message(id: &str) -> String {
    format!("Warning, patient with id: {}, need help", id)
}

/// Medical service comparing readings against the directory's current records
pub struct MedicalService<D: PatientDirectory, A: SendAlertService> {
    directory: D,
    alert_service: A,
}

impl<D: PatientDirectory, A: SendAlertService> MedicalService<D, A> {
    /// Create a new medical service
    pub fn new(directory: D, alert_service: A) -> Self {
        Self {
            directory,
            alert_service,
        }
    }

    /// Fetch the baseline for a patient
    fn health_info(&self, id: &str) -> Result<HealthInfo, MedicalServiceError> {
        self.directory
            .get_by_id(id)
            .map(|patient| patient.health_info)
            .map_err(|e| self.map_repo_error(e))
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> MedicalServiceError {
        match err {
            RepositoryError::NotFound(id) => MedicalServiceError::NotFound(id),
            _ => MedicalServiceError::RepositoryError(err.to_string()),
        }
    }
}

impl<D: PatientDirectory, A: SendAlertService> MedicalServiceTrait for MedicalService<D, A> {
    fn check_blood_pressure(&self, id: &str, reading: BloodPressure) -> Result<(), MedicalServiceError> {
        let normal = self.health_info(id)?.blood_pressure;

        if reading != normal {
            self.alert_service.send(&alert_message(id));
        }

        Ok(())
    }

    fn check_temperature(&self, id: &str, reading: Temperature) -> Result<(), MedicalServiceError> {
        let normal = self.health_info(id)?.normal_temperature;

        // Only a drop below normal is checked; fever passes silently
        if normal - reading > TEMPERATURE_DROP_LIMIT {
            self.alert_service.send(&alert_message(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;
    use patient_monitor_data::models::PatientInfo;
    use patient_monitor_data::repository::MockPatientDirectory;
    use crate::services::alert::MockSendAlertService;

    const ID: &str = "4er";

    fn temperature(value: &str) -> Temperature {
        value.parse().unwrap()
    }

    /// Create a test patient with the given baseline
    fn create_test_patient(id: &str, normal_temperature: &str, systolic: u16, diastolic: u16) -> PatientInfo {
        PatientInfo::new(
            id,
            "Ivan",
            "Petrov",
            NaiveDate::from_ymd_opt(1980, 11, 26).unwrap(),
            HealthInfo::new(temperature(normal_temperature), BloodPressure::new(systolic, diastolic)),
        )
    }

    /// Directory that answers every lookup with the standard test patient
    fn directory_with_patient() -> MockPatientDirectory {
        let mut directory = MockPatientDirectory::new();
        directory
            .expect_get_by_id()
            .returning(|id| Ok(create_test_patient(id, "36.6", 120, 90)));
        directory
    }

    /// Alert service that records every message it is given
    fn capturing_alerts() -> (MockSendAlertService, Arc<Mutex<Vec<String>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&captured);

        let mut alerts = MockSendAlertService::new();
        alerts
            .expect_send()
            .returning(move |message| sink.lock().unwrap().push(message.to_string()));

        (alerts, captured)
    }

    #[test]
    fn test_alert_message_format() {
        assert_eq!(alert_message("4er"), "Warning, patient with id: 4er, need help");
    }

    #[test]
    fn test_check_blood_pressure_message() {
        let (alerts, captured) = capturing_alerts();
        let service = MedicalService::new(directory_with_patient(), alerts);

        service.check_blood_pressure(ID, BloodPressure::new(140, 90)).unwrap();

        let messages = captured.lock().unwrap();
        assert_eq!(*messages, vec!["Warning, patient with id: 4er, need help".to_string()]);
    }

    #[test]
    fn test_check_blood_pressure_any_deviation_alerts_once() {
        let readings = [
            BloodPressure::new(140, 90),
            BloodPressure::new(120, 91),
            BloodPressure::new(119, 90),
            BloodPressure::new(90, 60),
        ];

        for reading in readings {
            let (alerts, captured) = capturing_alerts();
            let service = MedicalService::new(directory_with_patient(), alerts);

            service.check_blood_pressure(ID, reading).unwrap();

            assert_eq!(captured.lock().unwrap().len(), 1, "reading {} should alert once", reading);
        }
    }

    #[test]
    fn test_check_blood_pressure_matching_reading_is_silent() {
        let mut alerts = MockSendAlertService::new();
        alerts.expect_send().never();
        let service = MedicalService::new(directory_with_patient(), alerts);

        service.check_blood_pressure(ID, BloodPressure::new(120, 90)).unwrap();
    }

    #[test]
    fn test_check_temperature_message() {
        let (alerts, captured) = capturing_alerts();
        let service = MedicalService::new(directory_with_patient(), alerts);

        service.check_temperature(ID, temperature("35")).unwrap();

        let messages = captured.lock().unwrap();
        assert_eq!(*messages, vec!["Warning, patient with id: 4er, need help".to_string()]);
    }

    #[test]
    fn test_check_temperature_boundary_does_not_alert() {
        let mut alerts = MockSendAlertService::new();
        alerts.expect_send().never();
        let service = MedicalService::new(directory_with_patient(), alerts);

        // 36.6 - 35.2 = 1.4
        service.check_temperature(ID, temperature("35.2")).unwrap();
        // 36.6 - 35.1 = 1.5, not above the limit
        service.check_temperature(ID, temperature("35.1")).unwrap();
    }

    #[test]
    fn test_check_temperature_just_past_limit_alerts() {
        let (alerts, captured) = capturing_alerts();
        let service = MedicalService::new(directory_with_patient(), alerts);

        service.check_temperature(ID, temperature("35.099")).unwrap();

        assert_eq!(captured.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_check_temperature_fever_is_not_alerted() {
        let mut alerts = MockSendAlertService::new();
        alerts.expect_send().never();
        let service = MedicalService::new(directory_with_patient(), alerts);

        service.check_temperature(ID, temperature("38")).unwrap();
        service.check_temperature(ID, temperature("41.5")).unwrap();
    }

    #[test]
    fn test_check_temperature_extreme_values_do_not_overflow() {
        let mut directory = MockPatientDirectory::new();
        directory.expect_get_by_id().returning(|id| {
            let mut patient = create_test_patient(id, "36.6", 120, 90);
            patient.health_info.normal_temperature = Temperature::from_millidegrees(i64::MAX);
            Ok(patient)
        });
        let (alerts, captured) = capturing_alerts();
        let service = MedicalService::new(directory, alerts);

        // The drop saturates at the maximum and still counts as a drop
        service.check_temperature(ID, Temperature::from_millidegrees(-1)).unwrap();
        service.check_temperature(ID, Temperature::from_millidegrees(i64::MIN)).unwrap();
        // A reading far above a maximal baseline is still not a drop
        service.check_temperature(ID, Temperature::from_millidegrees(i64::MAX)).unwrap();

        assert_eq!(captured.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_check_normal_health_level() {
        let mut alerts = MockSendAlertService::new();
        alerts.expect_send().times(0);
        let service = MedicalService::new(directory_with_patient(), alerts);

        service.check_temperature(ID, temperature("38")).unwrap();
        service.check_blood_pressure(ID, BloodPressure::new(120, 90)).unwrap();
    }

    #[test]
    fn test_each_check_reads_directory_once() {
        let mut directory = MockPatientDirectory::new();
        directory
            .expect_get_by_id()
            .times(2)
            .returning(|id| Ok(create_test_patient(id, "36.6", 120, 90)));
        let (alerts, _) = capturing_alerts();
        let service = MedicalService::new(directory, alerts);

        service.check_blood_pressure(ID, BloodPressure::new(120, 90)).unwrap();
        service.check_temperature(ID, temperature("36.6")).unwrap();
    }

    #[test]
    fn test_unknown_patient_is_not_found() {
        let mut directory = MockPatientDirectory::new();
        directory
            .expect_get_by_id()
            .returning(|id| Err(RepositoryError::NotFound(id.to_string())));
        let mut alerts = MockSendAlertService::new();
        alerts.expect_send().never();
        let service = MedicalService::new(directory, alerts);

        assert_eq!(
            service.check_blood_pressure("nobody", BloodPressure::new(140, 90)),
            Err(MedicalServiceError::NotFound("nobody".to_string()))
        );
        assert_eq!(
            service.check_temperature("nobody", temperature("30")),
            Err(MedicalServiceError::NotFound("nobody".to_string()))
        );
    }

    #[test]
    fn test_other_repository_errors_are_wrapped() {
        let mut directory = MockPatientDirectory::new();
        directory
            .expect_get_by_id()
            .returning(|_| Err(RepositoryError::Lock("poisoned".to_string())));
        let mut alerts = MockSendAlertService::new();
        alerts.expect_send().never();
        let service = MedicalService::new(directory, alerts);

        let err = service.check_temperature(ID, temperature("30")).unwrap_err();
        assert!(matches!(err, MedicalServiceError::RepositoryError(ref msg) if msg.contains("poisoned")));
    }
}
