// models/src/reports.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Headline figures for a report date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
    #[serde(rename = "newPatients")]
    pub new_patients: u64,
    #[serde(rename = "totalVisits")]
    pub total_visits: u64,
}

/// One row of the payments table: a bill paid within the range, joined
/// with its patient's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReportRow {
    #[serde(rename = "bill_id")]
    pub bill_code: String,
    #[serde(rename = "patientName")]
    pub patient_name: String,
    #[serde(rename = "paymentDate")]
    pub payment_date: DateTime<Utc>,
    pub amount: f64,
    #[serde(rename = "paymentMethod")]
    pub payment_method: String,
}

/// Per-treatment-name usage and revenue across paid bills in the range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceReportRow {
    #[serde(rename = "serviceName")]
    pub service_name: String,
    #[serde(rename = "timesPerformed")]
    pub times_performed: u64,
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
}

/// One row of the new-patients table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatientReportRow {
    #[serde(rename = "patient_id")]
    pub patient_code: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "contactNumber")]
    pub contact_number: String,
    #[serde(rename = "dateRegistered")]
    pub date_registered: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullReport {
    pub summary: ReportSummary,
    pub payments: Vec<PaymentReportRow>,
    pub services: Vec<ServiceReportRow>,
    #[serde(rename = "newPatients")]
    pub new_patients: Vec<NewPatientReportRow>,
}

/// Key figures for the clinic-local current day shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(rename = "totalVisits")]
    pub total_visits: u64,
    #[serde(rename = "completedVisits")]
    pub completed_visits: u64,
    #[serde(rename = "pendingBills")]
    pub pending_bills: u64,
    #[serde(rename = "amountDue")]
    pub amount_due: f64,
    #[serde(rename = "paidToday")]
    pub paid_today: f64,
}
