// models/src/visit.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::patient::{Patient, PatientSummary};

/// A clinic visit, as stored in the `visits` collection.
///
/// Visits are created only through the visit workflow (together with their
/// bill) and are immutable afterwards. Many visits reference one patient;
/// deleting the patient leaves those references dangling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    pub id: Uuid,
    #[serde(rename = "visit_id")]
    pub code: String,
    pub patient_id: Uuid,
    #[serde(rename = "entryDate")]
    pub entry_date: DateTime<Utc>,
    pub problem: String,
}

/// Payload for creating a visit. `patient_id` arrives as a string and is
/// validated before any sequence number is drawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVisit {
    pub patient_id: String,
    pub problem: String,
}

/// Display shape for a visit: the owning patient embedded by value and the
/// entry instant pre-rendered for the requested view (12-hour clock for
/// today's list, calendar date for per-patient history).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitResponse {
    pub id: Uuid,
    #[serde(rename = "visit_id")]
    pub code: String,
    pub problem: String,
    #[serde(rename = "entryDate")]
    pub entry_date: String,
    pub patient: PatientSummary,
}

impl VisitResponse {
    pub fn new(visit: &Visit, patient: &Patient, entry_date: String) -> Self {
        VisitResponse {
            id: visit.id,
            code: visit.code.clone(),
            problem: visit.problem.clone(),
            entry_date,
            patient: PatientSummary::from(patient),
        }
    }
}
