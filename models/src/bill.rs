// models/src/bill.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment lifecycle of a bill. One-way: `Unpaid -> Paid`. The transition
/// is driven by the bill-update operation and stamps `payment_date` with
/// the clinic-local current time at the moment of transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillStatus {
    Unpaid,
    Paid,
}

/// A treatment applied to a bill: a snapshot of the catalog entry's name
/// and cost at billing time, decoupled from later catalog edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentLine {
    pub treatment_id: Uuid,
    pub name: String,
    pub cost: f64,
}

/// A bill, as stored in the `bills` collection. Exactly one bill is created
/// alongside each visit, starting empty and unpaid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: Uuid,
    #[serde(rename = "bill_id")]
    pub code: String,
    pub visit_id: Uuid,
    pub treatments: Vec<TreatmentLine>,
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
    #[serde(rename = "paymentStatus")]
    pub payment_status: BillStatus,
    #[serde(rename = "paymentMethod", default)]
    pub payment_method: Option<String>,
    #[serde(rename = "medicalRemark", default)]
    pub medical_remark: Option<String>,
    #[serde(rename = "paymentDate", default)]
    pub payment_date: Option<DateTime<Utc>>,
}

impl Bill {
    /// The bill created at the same instant as its owning visit: no
    /// treatments, zero total, unpaid.
    pub fn unpaid(code: String, visit_id: Uuid) -> Self {
        Bill {
            id: Uuid::new_v4(),
            code,
            visit_id,
            treatments: Vec::new(),
            total_amount: 0.0,
            payment_status: BillStatus::Unpaid,
            payment_method: None,
            medical_remark: None,
            payment_date: None,
        }
    }
}

/// Billing update payload: replaces the treatment list, total, and status.
/// Any `paymentDate` supplied by the caller is ignored; the server stamps
/// it itself iff the new status is `Paid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillUpdate {
    pub treatments: Vec<TreatmentLine>,
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
    #[serde(rename = "paymentStatus")]
    pub payment_status: BillStatus,
    #[serde(rename = "paymentMethod", default)]
    pub payment_method: Option<String>,
    #[serde(rename = "medicalRemark", default)]
    pub medical_remark: Option<String>,
    #[serde(rename = "paymentDate", default)]
    pub payment_date: Option<DateTime<Utc>>,
}

/// The slice of a visit embedded in bill responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitSummary {
    pub id: Uuid,
    #[serde(rename = "visit_id")]
    pub code: String,
    #[serde(rename = "entryDate")]
    pub entry_date: DateTime<Utc>,
}

/// The slice of a patient embedded in bill responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientName {
    #[serde(rename = "fullName")]
    pub full_name: String,
}

/// Display shape for a bill: the bill joined with its owning visit and
/// that visit's patient. Assembled by the read-side projection layer;
/// nothing denormalized is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillResponse {
    pub id: Uuid,
    #[serde(rename = "bill_id")]
    pub code: String,
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
    #[serde(rename = "paymentStatus")]
    pub payment_status: BillStatus,
    #[serde(rename = "paymentMethod")]
    pub payment_method: Option<String>,
    #[serde(rename = "medicalRemark")]
    pub medical_remark: Option<String>,
    #[serde(rename = "paymentDate")]
    pub payment_date: Option<DateTime<Utc>>,
    pub treatments: Vec<TreatmentLine>,
    pub visit: VisitSummary,
    pub patient: PatientName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_empty_and_unpaid() {
        let visit_id = Uuid::new_v4();
        let bill = Bill::unpaid("B-008".to_string(), visit_id);
        assert_eq!(bill.visit_id, visit_id);
        assert_eq!(bill.total_amount, 0.0);
        assert_eq!(bill.payment_status, BillStatus::Unpaid);
        assert!(bill.treatments.is_empty());
        assert!(bill.payment_method.is_none());
        assert!(bill.payment_date.is_none());
    }

    #[test]
    fn should_serialize_status_as_plain_variant_name() {
        assert_eq!(
            serde_json::to_value(BillStatus::Unpaid).unwrap(),
            serde_json::json!("Unpaid")
        );
        assert_eq!(
            serde_json::to_value(BillStatus::Paid).unwrap(),
            serde_json::json!("Paid")
        );
    }
}
