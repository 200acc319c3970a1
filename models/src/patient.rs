// models/src/patient.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered patient, as stored in the `patients` collection.
///
/// `code` is the human-readable `PT-NNN` identifier minted from the
/// `patients` sequence at registration; `id` is the storage identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    #[serde(rename = "patient_id")]
    pub code: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "contactNumber")]
    pub contact_number: String,
    #[serde(default)]
    pub dob: Option<DateTime<Utc>>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "medicalHistory", default)]
    pub medical_history: Option<String>,
    #[serde(rename = "dateRegistered")]
    pub date_registered: DateTime<Utc>,
}

/// Registration / update payload for a patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatient {
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "contactNumber")]
    pub contact_number: String,
    #[serde(default)]
    pub dob: Option<DateTime<Utc>>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "medicalHistory", default)]
    pub medical_history: Option<String>,
    #[serde(rename = "dateRegistered")]
    pub date_registered: DateTime<Utc>,
}

impl Patient {
    /// Builds a stored patient from a registration payload and a freshly
    /// allocated display code.
    pub fn from_new(code: String, new: NewPatient) -> Self {
        Patient {
            id: Uuid::new_v4(),
            code,
            full_name: new.full_name,
            contact_number: new.contact_number,
            dob: new.dob,
            gender: new.gender,
            address: new.address,
            medical_history: new.medical_history,
            date_registered: new.date_registered,
        }
    }

    /// Applies an update payload in place, leaving `id` and `code` alone.
    pub fn apply(&mut self, update: NewPatient) {
        self.full_name = update.full_name;
        self.contact_number = update.contact_number;
        self.dob = update.dob;
        self.gender = update.gender;
        self.address = update.address;
        self.medical_history = update.medical_history;
        self.date_registered = update.date_registered;
    }
}

/// The slice of a patient embedded in visit responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSummary {
    pub id: Uuid,
    #[serde(rename = "patient_id")]
    pub code: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
}

impl From<&Patient> for PatientSummary {
    fn from(patient: &Patient) -> Self {
        PatientSummary {
            id: patient.id,
            code: patient.code.clone(),
            full_name: patient.full_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn payload(name: &str) -> NewPatient {
        NewPatient {
            full_name: name.to_string(),
            contact_number: "9876543210".to_string(),
            dob: None,
            gender: Some("Female".to_string()),
            address: None,
            medical_history: None,
            date_registered: Utc::now(),
        }
    }

    #[test]
    fn should_keep_id_and_code_across_updates() {
        let mut patient = Patient::from_new("PT-007".to_string(), payload("Asha Rao"));
        let id = patient.id;
        patient.apply(payload("Asha R. Rao"));
        assert_eq!(patient.id, id);
        assert_eq!(patient.code, "PT-007");
        assert_eq!(patient.full_name, "Asha R. Rao");
    }

    #[test]
    fn should_serialize_with_api_field_names() {
        let patient = Patient::from_new("PT-001".to_string(), payload("Asha Rao"));
        let value = serde_json::to_value(&patient).unwrap();
        assert_eq!(value["patient_id"], "PT-001");
        assert_eq!(value["fullName"], "Asha Rao");
        assert!(value.get("full_name").is_none());
    }
}
