// models/src/lib.rs

pub mod bill;
pub mod codes;
pub mod clinic_time;
pub mod errors;
pub mod patient;
pub mod reports;
pub mod treatment;
pub mod visit;

pub use bill::{Bill, BillResponse, BillStatus, BillUpdate, PatientName, TreatmentLine, VisitSummary};
pub use codes::CodePrefix;
pub use errors::{ClinicError, ClinicResult};
pub use patient::{NewPatient, Patient, PatientSummary};
pub use reports::{
    DashboardStats, FullReport, NewPatientReportRow, PaymentReportRow, ReportSummary,
    ServiceReportRow,
};
pub use treatment::{NewTreatment, Treatment};
pub use visit::{NewVisit, Visit, VisitResponse};
