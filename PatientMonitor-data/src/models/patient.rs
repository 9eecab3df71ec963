use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::temperature::Temperature;

/// A blood pressure pair in mmHg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BloodPressure {
    /// Systolic blood pressure (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: u16,
}

impl BloodPressure {
    pub const fn new(systolic: u16, diastolic: u16) -> Self {
        Self { systolic, diastolic }
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// Baseline health values a patient's readings are compared against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthInfo {
    /// Normal body temperature
    pub normal_temperature: Temperature,

    /// Normal blood pressure
    pub blood_pressure: BloodPressure,
}

impl HealthInfo {
    pub fn new(normal_temperature: Temperature, blood_pressure: BloodPressure) -> Self {
        Self {
            normal_temperature,
            blood_pressure,
        }
    }
}

/// Storage model for a registered patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInfo {
    /// Unique identifier for the patient
    pub id: String,

    /// Given name
    pub name: String,

    /// Family name
    pub surname: String,

    /// Date of birth
    pub birthday: NaiveDate,

    /// Baseline health values
    pub health_info: HealthInfo,
}

impl PatientInfo {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
        birthday: NaiveDate,
        health_info: HealthInfo,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            surname: surname.into(),
            birthday,
            health_info,
        }
    }
}

/// Input data for registering a new patient
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewPatientRequest {
    /// Given name
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    /// Family name
    #[validate(length(min = 1, max = 100, message = "Surname must be between 1 and 100 characters"))]
    pub surname: String,

    /// Date of birth
    pub birthday: NaiveDate,

    /// Normal body temperature
    pub normal_temperature: Temperature,

    /// Normal systolic blood pressure
    #[validate(range(min = 40, max = 300, message = "Systolic must be between 40 and 300"))]
    pub systolic: u16,

    /// Normal diastolic blood pressure
    #[validate(range(min = 20, max = 200, message = "Diastolic must be between 20 and 200"))]
    pub diastolic: u16,
}

impl NewPatientRequest {
    /// Turn the request into a stored record under the given id
    pub fn into_patient(self, id: impl Into<String>) -> PatientInfo {
        PatientInfo::new(
            id,
            self.name,
            self.surname,
            self.birthday,
            HealthInfo::new(
                self.normal_temperature,
                BloodPressure::new(self.systolic, self.diastolic),
            ),
        )
    }
}
