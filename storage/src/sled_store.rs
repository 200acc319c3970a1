// storage/src/sled_store.rs

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use sled::{Db, Tree};
use tracing::info;
use uuid::Uuid;

use models::{Bill, BillStatus, ClinicError, ClinicResult, Patient, Treatment, Visit};

use crate::store::{ClinicStore, TimeRange};

const PATIENTS_TREE: &str = "patients";
const VISITS_TREE: &str = "visits";
const BILLS_TREE: &str = "bills";
const TREATMENTS_TREE: &str = "treatments";
const COUNTERS_TREE: &str = "counters";

/// Sled-backed store: one tree per collection, JSON document values keyed
/// by UUID bytes. Counters live in their own tree as 8-byte big-endian
/// integers, mutated only through `update_and_fetch`.
pub struct SledStore {
    _db: Db,
    patients: Tree,
    visits: Tree,
    bills: Tree,
    treatments: Tree,
    counters: Tree,
}

impl SledStore {
    pub fn open(path: impl AsRef<Path>) -> ClinicResult<Self> {
        let path = path.as_ref();
        let db = sled::open(path).map_err(storage_err)?;
        info!("opened clinic database at {}", path.display());
        Self::from_db(db)
    }

    /// In-memory database, dropped on close. Test fixture.
    pub fn temporary() -> ClinicResult<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(storage_err)?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> ClinicResult<Self> {
        let patients = db.open_tree(PATIENTS_TREE).map_err(storage_err)?;
        let visits = db.open_tree(VISITS_TREE).map_err(storage_err)?;
        let bills = db.open_tree(BILLS_TREE).map_err(storage_err)?;
        let treatments = db.open_tree(TREATMENTS_TREE).map_err(storage_err)?;
        let counters = db.open_tree(COUNTERS_TREE).map_err(storage_err)?;
        Ok(SledStore {
            _db: db,
            patients,
            visits,
            bills,
            treatments,
            counters,
        })
    }
}

fn storage_err(err: sled::Error) -> ClinicError {
    ClinicError::Storage(err.to_string())
}

fn put_record<T: Serialize>(tree: &Tree, id: Uuid, record: &T) -> ClinicResult<()> {
    let bytes = serde_json::to_vec(record)?;
    tree.insert(id.as_bytes(), bytes).map_err(storage_err)?;
    Ok(())
}

fn get_record<T: DeserializeOwned>(tree: &Tree, id: Uuid) -> ClinicResult<Option<T>> {
    match tree.get(id.as_bytes()).map_err(storage_err)? {
        Some(ivec) => Ok(Some(serde_json::from_slice(&ivec)?)),
        None => Ok(None),
    }
}

/// Replaces a record iff it already exists; reports whether it matched.
fn replace_record<T: Serialize>(tree: &Tree, id: Uuid, record: &T) -> ClinicResult<bool> {
    if tree.get(id.as_bytes()).map_err(storage_err)?.is_none() {
        return Ok(false);
    }
    put_record(tree, id, record)?;
    Ok(true)
}

fn remove_record(tree: &Tree, id: Uuid) -> ClinicResult<bool> {
    Ok(tree.remove(id.as_bytes()).map_err(storage_err)?.is_some())
}

/// Full scan of a tree into deserialized records. Collections here are
/// small (a single practice), so scans stand in for secondary indexes.
fn scan_records<T: DeserializeOwned>(tree: &Tree) -> ClinicResult<Vec<T>> {
    let mut records = Vec::new();
    for item in tree.iter() {
        let (_, value) = item.map_err(storage_err)?;
        records.push(serde_json::from_slice(&value)?);
    }
    Ok(records)
}

/// Counter records are exactly 8 big-endian bytes. Anything else is a
/// corrupted record: surfacing it beats restarting the sequence at 1 and
/// reissuing codes that are already in use.
fn decode_counter(bytes: &[u8]) -> ClinicResult<u64> {
    let buf: [u8; 8] = bytes.try_into().map_err(|_| {
        ClinicError::Storage(format!(
            "counter record has unexpected length {}",
            bytes.len()
        ))
    })?;
    Ok(u64::from_be_bytes(buf))
}

#[async_trait::async_trait]
impl ClinicStore for SledStore {
    async fn insert_patient(&self, patient: &Patient) -> ClinicResult<()> {
        put_record(&self.patients, patient.id, patient)
    }

    async fn get_patient(&self, id: Uuid) -> ClinicResult<Option<Patient>> {
        get_record(&self.patients, id)
    }

    async fn list_patients(&self) -> ClinicResult<Vec<Patient>> {
        scan_records(&self.patients)
    }

    async fn update_patient(&self, patient: &Patient) -> ClinicResult<bool> {
        replace_record(&self.patients, patient.id, patient)
    }

    async fn delete_patient(&self, id: Uuid) -> ClinicResult<bool> {
        // No cascade: visits and bills keep their references.
        remove_record(&self.patients, id)
    }

    async fn patients_registered_between(&self, range: TimeRange) -> ClinicResult<Vec<Patient>> {
        let mut patients: Vec<Patient> = scan_records(&self.patients)?;
        patients.retain(|p| p.date_registered >= range.0 && p.date_registered <= range.1);
        Ok(patients)
    }

    async fn insert_visit(&self, visit: &Visit) -> ClinicResult<()> {
        put_record(&self.visits, visit.id, visit)
    }

    async fn get_visit(&self, id: Uuid) -> ClinicResult<Option<Visit>> {
        get_record(&self.visits, id)
    }

    async fn visits_by_patient(&self, patient_id: Uuid) -> ClinicResult<Vec<Visit>> {
        let mut visits: Vec<Visit> = scan_records(&self.visits)?;
        visits.retain(|v| v.patient_id == patient_id);
        Ok(visits)
    }

    async fn visits_between(&self, range: TimeRange) -> ClinicResult<Vec<Visit>> {
        let mut visits: Vec<Visit> = scan_records(&self.visits)?;
        visits.retain(|v| v.entry_date >= range.0 && v.entry_date <= range.1);
        Ok(visits)
    }

    async fn insert_bill(&self, bill: &Bill) -> ClinicResult<()> {
        put_record(&self.bills, bill.id, bill)
    }

    async fn get_bill(&self, id: Uuid) -> ClinicResult<Option<Bill>> {
        get_record(&self.bills, id)
    }

    async fn update_bill(&self, bill: &Bill) -> ClinicResult<bool> {
        replace_record(&self.bills, bill.id, bill)
    }

    async fn bills_by_status(&self, status: BillStatus) -> ClinicResult<Vec<Bill>> {
        let mut bills: Vec<Bill> = scan_records(&self.bills)?;
        bills.retain(|b| b.payment_status == status);
        Ok(bills)
    }

    async fn bills_paid_between(&self, range: TimeRange) -> ClinicResult<Vec<Bill>> {
        let mut bills: Vec<Bill> = scan_records(&self.bills)?;
        bills.retain(|b| {
            b.payment_status == BillStatus::Paid
                && b.payment_date
                    .map(|d| d >= range.0 && d <= range.1)
                    .unwrap_or(false)
        });
        Ok(bills)
    }

    async fn bills_for_visits(&self, visit_ids: &[Uuid]) -> ClinicResult<Vec<Bill>> {
        let mut bills: Vec<Bill> = scan_records(&self.bills)?;
        bills.retain(|b| visit_ids.contains(&b.visit_id));
        Ok(bills)
    }

    async fn insert_treatment(&self, treatment: &Treatment) -> ClinicResult<()> {
        put_record(&self.treatments, treatment.id, treatment)
    }

    async fn get_treatment(&self, id: Uuid) -> ClinicResult<Option<Treatment>> {
        get_record(&self.treatments, id)
    }

    async fn list_treatments(&self) -> ClinicResult<Vec<Treatment>> {
        scan_records(&self.treatments)
    }

    async fn update_treatment(&self, treatment: &Treatment) -> ClinicResult<bool> {
        replace_record(&self.treatments, treatment.id, treatment)
    }

    async fn delete_treatment(&self, id: Uuid) -> ClinicResult<bool> {
        remove_record(&self.treatments, id)
    }

    async fn increment_counter(&self, name: &str) -> ClinicResult<Option<u64>> {
        let updated = self
            .counters
            .update_and_fetch(name.as_bytes(), |old| match old {
                None => Some(1u64.to_be_bytes().to_vec()),
                Some(bytes) => match decode_counter(bytes) {
                    Ok(value) => Some(value.saturating_add(1).to_be_bytes().to_vec()),
                    // Leave corrupted bytes in place; the decode below
                    // surfaces them instead of clobbering the record.
                    Err(_) => Some(bytes.to_vec()),
                },
            })
            .map_err(storage_err)?;
        match updated {
            Some(ivec) => Ok(Some(decode_counter(&ivec)?)),
            None => Ok(None),
        }
    }

    async fn read_counter(&self, name: &str) -> ClinicResult<Option<u64>> {
        match self.counters.get(name.as_bytes()).map_err(storage_err)? {
            Some(ivec) => Ok(Some(decode_counter(&ivec)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};
    use models::{NewPatient, NewTreatment};

    fn patient(name: &str) -> Patient {
        Patient::from_new(
            "PT-001".to_string(),
            NewPatient {
                full_name: name.to_string(),
                contact_number: "9000000000".to_string(),
                dob: None,
                gender: None,
                address: None,
                medical_history: None,
                date_registered: Utc::now(),
            },
        )
    }

    fn visit_for(patient_id: Uuid, code: &str) -> Visit {
        Visit {
            id: Uuid::new_v4(),
            code: code.to_string(),
            patient_id,
            entry_date: Utc::now(),
            problem: "back pain".to_string(),
        }
    }

    #[tokio::test]
    async fn should_round_trip_patient_records() {
        let store = SledStore::temporary().unwrap();
        let p = patient("Asha Rao");
        store.insert_patient(&p).await.unwrap();

        let fetched = store.get_patient(p.id).await.unwrap().unwrap();
        assert_eq!(fetched.full_name, "Asha Rao");
        assert_eq!(fetched.code, "PT-001");
    }

    #[tokio::test]
    async fn should_report_no_match_when_updating_absent_record() {
        let store = SledStore::temporary().unwrap();
        let p = patient("Asha Rao");
        assert!(!store.update_patient(&p).await.unwrap());
        assert!(!store.delete_patient(p.id).await.unwrap());
    }

    #[tokio::test]
    async fn should_leave_visits_dangling_after_patient_delete() {
        let store = SledStore::temporary().unwrap();
        let p = patient("Asha Rao");
        store.insert_patient(&p).await.unwrap();
        let v = visit_for(p.id, "V-001");
        store.insert_visit(&v).await.unwrap();

        assert!(store.delete_patient(p.id).await.unwrap());

        // The visit survives and still points at the deleted patient.
        let remaining = store.visits_by_patient(p.id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].patient_id, p.id);
        assert!(store.get_patient(p.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_filter_visits_by_entry_range() {
        let store = SledStore::temporary().unwrap();
        let p = patient("Asha Rao");
        let mut old = visit_for(p.id, "V-001");
        old.entry_date = Utc::now() - TimeDelta::days(3);
        let fresh = visit_for(p.id, "V-002");
        store.insert_visit(&old).await.unwrap();
        store.insert_visit(&fresh).await.unwrap();

        let range = (Utc::now() - TimeDelta::hours(1), Utc::now());
        let in_range = store.visits_between(range).await.unwrap();
        assert_eq!(in_range.len(), 1);
        assert_eq!(in_range[0].code, "V-002");
    }

    #[tokio::test]
    async fn should_select_paid_bills_within_range_only() {
        let store = SledStore::temporary().unwrap();
        let visit_id = Uuid::new_v4();

        let unpaid = Bill::unpaid("B-001".to_string(), visit_id);
        let mut paid = Bill::unpaid("B-002".to_string(), visit_id);
        paid.payment_status = BillStatus::Paid;
        paid.payment_date = Some(Utc::now());
        let mut paid_long_ago = Bill::unpaid("B-003".to_string(), visit_id);
        paid_long_ago.payment_status = BillStatus::Paid;
        paid_long_ago.payment_date = Some(Utc::now() - TimeDelta::days(30));

        for bill in [&unpaid, &paid, &paid_long_ago] {
            store.insert_bill(bill).await.unwrap();
        }

        let range = (Utc::now() - TimeDelta::hours(1), Utc::now());
        let hits = store.bills_paid_between(range).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "B-002");

        let pending = store.bills_by_status(BillStatus::Unpaid).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].code, "B-001");
    }

    #[tokio::test]
    async fn should_keep_bill_snapshots_independent_of_catalog_edits() {
        let store = SledStore::temporary().unwrap();
        let mut treatment = Treatment::from_new(NewTreatment {
            name: "Ultrasound".to_string(),
            cost: 500.0,
            duration: "20 min".to_string(),
        });
        store.insert_treatment(&treatment).await.unwrap();

        let mut bill = Bill::unpaid("B-001".to_string(), Uuid::new_v4());
        bill.treatments.push(models::TreatmentLine {
            treatment_id: treatment.id,
            name: treatment.name.clone(),
            cost: treatment.cost,
        });
        bill.total_amount = 500.0;
        store.insert_bill(&bill).await.unwrap();

        treatment.apply(NewTreatment {
            name: "Ultrasound".to_string(),
            cost: 750.0,
            duration: "20 min".to_string(),
        });
        assert!(store.update_treatment(&treatment).await.unwrap());

        let stored = store.get_bill(bill.id).await.unwrap().unwrap();
        assert_eq!(stored.treatments[0].cost, 500.0);
    }

    #[tokio::test]
    async fn should_create_counter_at_one_and_count_up() {
        let store = SledStore::temporary().unwrap();
        assert_eq!(store.read_counter("visits").await.unwrap(), None);
        assert_eq!(store.increment_counter("visits").await.unwrap(), Some(1));
        assert_eq!(store.increment_counter("visits").await.unwrap(), Some(2));
        assert_eq!(store.read_counter("visits").await.unwrap(), Some(2));
        // Other names are independent.
        assert_eq!(store.increment_counter("bills").await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn should_reject_corrupted_counter_bytes_instead_of_restarting() {
        let store = SledStore::temporary().unwrap();
        store.counters.insert("visits".as_bytes(), &[1u8, 2, 3][..]).unwrap();

        let err = store.increment_counter("visits").await.unwrap_err();
        assert!(matches!(err, ClinicError::Storage(_)));
        let err = store.read_counter("visits").await.unwrap_err();
        assert!(matches!(err, ClinicError::Storage(_)));

        // The corrupted record is left as-is rather than overwritten.
        let raw = store.counters.get("visits").unwrap().unwrap();
        assert_eq!(raw.as_ref(), &[1u8, 2, 3]);
    }
}
