// storage/src/store.rs

use chrono::{DateTime, Utc};
use models::{Bill, BillStatus, ClinicResult, Patient, Treatment, Visit};
use uuid::Uuid;

/// Inclusive UTC range, already converted from clinic-local day bounds.
pub type TimeRange = (DateTime<Utc>, DateTime<Utc>);

/// Abstract document-store contract for the clinic collections.
///
/// Any store providing these operations suffices; the shipped backend is
/// [`crate::SledStore`]. Every operation is a single bounded round-trip —
/// the only one with a cross-caller guarantee is `increment_counter`, which
/// must be atomic so that concurrent callers never see the same value.
///
/// `update_*` and `delete_*` report whether a record matched, so callers
/// can map a miss to a not-found error. `delete_patient` does NOT cascade:
/// visits and bills referencing the patient are left dangling, which is
/// accepted behavior for this system.
#[async_trait::async_trait]
pub trait ClinicStore: Send + Sync + 'static {
    // --- Patients ---
    async fn insert_patient(&self, patient: &Patient) -> ClinicResult<()>;
    async fn get_patient(&self, id: Uuid) -> ClinicResult<Option<Patient>>;
    async fn list_patients(&self) -> ClinicResult<Vec<Patient>>;
    async fn update_patient(&self, patient: &Patient) -> ClinicResult<bool>;
    async fn delete_patient(&self, id: Uuid) -> ClinicResult<bool>;
    async fn patients_registered_between(&self, range: TimeRange) -> ClinicResult<Vec<Patient>>;

    // --- Visits ---
    async fn insert_visit(&self, visit: &Visit) -> ClinicResult<()>;
    async fn get_visit(&self, id: Uuid) -> ClinicResult<Option<Visit>>;
    async fn visits_by_patient(&self, patient_id: Uuid) -> ClinicResult<Vec<Visit>>;
    async fn visits_between(&self, range: TimeRange) -> ClinicResult<Vec<Visit>>;

    // --- Bills ---
    async fn insert_bill(&self, bill: &Bill) -> ClinicResult<()>;
    async fn get_bill(&self, id: Uuid) -> ClinicResult<Option<Bill>>;
    async fn update_bill(&self, bill: &Bill) -> ClinicResult<bool>;
    async fn bills_by_status(&self, status: BillStatus) -> ClinicResult<Vec<Bill>>;
    async fn bills_paid_between(&self, range: TimeRange) -> ClinicResult<Vec<Bill>>;
    async fn bills_for_visits(&self, visit_ids: &[Uuid]) -> ClinicResult<Vec<Bill>>;

    // --- Treatment catalog ---
    async fn insert_treatment(&self, treatment: &Treatment) -> ClinicResult<()>;
    async fn get_treatment(&self, id: Uuid) -> ClinicResult<Option<Treatment>>;
    async fn list_treatments(&self) -> ClinicResult<Vec<Treatment>>;
    async fn update_treatment(&self, treatment: &Treatment) -> ClinicResult<bool>;
    async fn delete_treatment(&self, id: Uuid) -> ClinicResult<bool>;

    // --- Counters ---
    /// Atomic upsert-and-increment of the named counter: creates it at 1
    /// when absent, otherwise bumps it by 1, and returns the post-increment
    /// value. `None` only if the engine reports no post-update document.
    async fn increment_counter(&self, name: &str) -> ClinicResult<Option<u64>>;

    /// Plain read of a counter's current value. Used by the allocator's
    /// single retry and by tests asserting counters unchanged.
    async fn read_counter(&self, name: &str) -> ClinicResult<Option<u64>>;
}
