use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use patient_monitor_data::models::{BloodPressure, NewPatientRequest, Temperature};
use patient_monitor_data::repository::{PatientRepository, RepositoryError};
use patient_monitor_domain::services::{MedicalService, MedicalServiceError, MedicalServiceTrait, SendAlertService};

/// Errors raised while running the demo
#[derive(Debug, Error)]
pub enum DemoError {
    /// Registering a demo patient failed
    #[error("Failed to register patient: {0}")]
    Registration(#[from] RepositoryError),

    /// A check could not be completed
    #[error("Check failed: {0}")]
    Check(#[from] MedicalServiceError),

    /// A hard-coded demo date is invalid
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// What the demo did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoSummary {
    /// Patients registered
    pub patients: usize,
    /// Checks performed
    pub checks: usize,
}

fn birthday(year: i32, month: u32, day: u32) -> Result<NaiveDate, DemoError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DemoError::InvalidDate(format!("{}-{}-{}", year, month, day)))
}

/// Register two patients and run a fixed round of checks against them.
///
/// The first patient's blood pressure and the second patient's temperature are
/// out of range, so a run delivers exactly two alerts to `alert_service`.
pub fn run_demo<A: SendAlertService>(alert_service: A) -> Result<DemoSummary, DemoError> {
    let repository = PatientRepository::new();

    let ivan = repository.add(NewPatientRequest {
        name: "Ivan".to_string(),
        surname: "Petrov".to_string(),
        birthday: birthday(1980, 11, 26)?,
        normal_temperature: Temperature::from_millidegrees(36_650),
        systolic: 120,
        diastolic: 80,
    })?;

    let semyon = repository.add(NewPatientRequest {
        name: "Semyon".to_string(),
        surname: "Mikhailov".to_string(),
        birthday: birthday(1982, 1, 16)?,
        normal_temperature: Temperature::from_millidegrees(36_600),
        systolic: 125,
        diastolic: 78,
    })?;

    let patients = repository.len()?;
    info!("Registered {} patients", patients);

    let service = MedicalService::new(&repository, alert_service);
    let mut checks = 0;

    let blood_pressure_checks = [
        (&ivan.id, BloodPressure::new(60, 120)),
        (&semyon.id, BloodPressure::new(125, 78)),
    ];
    for (id, reading) in blood_pressure_checks {
        info!("Checking blood pressure {} for patient {}", reading, id);
        service.check_blood_pressure(id, reading)?;
        checks += 1;
    }

    let temperature_checks = [
        (&ivan.id, Temperature::from_millidegrees(37_900)),
        (&semyon.id, Temperature::from_millidegrees(34_900)),
    ];
    for (id, reading) in temperature_checks {
        info!("Checking temperature {} for patient {}", reading, id);
        service.check_temperature(id, reading)?;
        checks += 1;
    }

    Ok(DemoSummary { patients, checks })
}
