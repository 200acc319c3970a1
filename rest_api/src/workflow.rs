// rest_api/src/workflow.rs

use tracing::info;
use uuid::Uuid;

use models::{
    Bill, BillStatus, BillUpdate, ClinicError, ClinicResult, CodePrefix, NewVisit, Visit,
    VisitResponse, clinic_time,
};

use storage::ClinicStore;

use crate::AppState;

/// Creates a visit and its bill as one logical operation.
///
/// Ordering matters: the patient is validated and fetched before any
/// sequence number is drawn, so a bad request never burns a number. The
/// two inserts are not wrapped in a transaction — if the bill insert fails
/// after the visit insert succeeded, the visit is left without a bill and
/// the failing step's error is surfaced as-is. Allocated numbers are never
/// rolled back either way.
pub async fn create_visit(state: &AppState, payload: NewVisit) -> ClinicResult<VisitResponse> {
    let patient_id =
        Uuid::parse_str(&payload.patient_id).map_err(|_| ClinicError::invalid_id("patient"))?;

    let patient = state
        .store
        .get_patient(patient_id)
        .await?
        .ok_or_else(|| ClinicError::not_found("Patient", &payload.patient_id))?;

    let visit_code = state.allocator.next_code(CodePrefix::Visit).await?;
    let bill_code = state.allocator.next_code(CodePrefix::Bill).await?;

    let visit = Visit {
        id: Uuid::new_v4(),
        code: visit_code,
        patient_id,
        entry_date: clinic_time::now_utc(),
        problem: payload.problem,
    };
    state.store.insert_visit(&visit).await?;

    let bill = Bill::unpaid(bill_code, visit.id);
    state.store.insert_bill(&bill).await?;

    info!("created visit {} with bill {}", visit.code, bill.code);

    let entry_time = clinic_time::format_entry_time(&visit.entry_date);
    Ok(VisitResponse::new(&visit, &patient, entry_time))
}

/// Replaces a bill's treatment list, total, and payment fields.
///
/// The payment timestamp is stamped with the clinic-local current time iff
/// the incoming status is `Paid`; any caller-supplied payment date is
/// ignored, and for other statuses the stored timestamp is left untouched.
pub async fn update_bill(state: &AppState, bill_id: Uuid, update: BillUpdate) -> ClinicResult<Bill> {
    let mut bill = state
        .store
        .get_bill(bill_id)
        .await?
        .ok_or_else(|| ClinicError::not_found("Bill", bill_id))?;

    bill.treatments = update.treatments;
    bill.total_amount = update.total_amount;
    bill.payment_method = update.payment_method;
    bill.medical_remark = update.medical_remark;
    if update.payment_status == BillStatus::Paid {
        bill.payment_date = Some(clinic_time::now_utc());
    }
    bill.payment_status = update.payment_status;

    if !state.store.update_bill(&bill).await? {
        return Err(ClinicError::not_found("Bill", bill_id));
    }
    Ok(bill)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};
    use models::{NewPatient, Patient, TreatmentLine};
    use std::sync::Arc;
    use storage::SledStore;

    fn state() -> AppState {
        AppState::new(Arc::new(SledStore::temporary().unwrap()))
    }

    async fn registered_patient(state: &AppState) -> Patient {
        let patient = Patient::from_new(
            "PT-001".to_string(),
            NewPatient {
                full_name: "Asha Rao".to_string(),
                contact_number: "9000000000".to_string(),
                dob: None,
                gender: None,
                address: None,
                medical_history: None,
                date_registered: Utc::now(),
            },
        );
        state.store.insert_patient(&patient).await.unwrap();
        patient
    }

    fn new_visit(patient_id: &str) -> NewVisit {
        NewVisit {
            patient_id: patient_id.to_string(),
            problem: "back pain".to_string(),
        }
    }

    #[tokio::test]
    async fn should_reject_malformed_patient_id_without_allocating() {
        let state = state();
        let err = create_visit(&state, new_visit("not-a-uuid")).await.unwrap_err();
        assert!(matches!(err, ClinicError::Validation(_)));
        assert_eq!(state.store.read_counter("visits").await.unwrap(), None);
        assert_eq!(state.store.read_counter("bills").await.unwrap(), None);
    }

    #[tokio::test]
    async fn should_reject_unknown_patient_without_allocating() {
        let state = state();
        let missing = Uuid::new_v4().to_string();
        let err = create_visit(&state, new_visit(&missing)).await.unwrap_err();
        assert!(matches!(err, ClinicError::NotFound(_)));
        assert_eq!(state.store.read_counter("visits").await.unwrap(), None);
        assert_eq!(state.store.read_counter("bills").await.unwrap(), None);
    }

    #[tokio::test]
    async fn should_create_visit_with_linked_unpaid_bill() {
        let state = state();
        let patient = registered_patient(&state).await;

        let response = create_visit(&state, new_visit(&patient.id.to_string()))
            .await
            .unwrap();
        assert_eq!(response.code, "V-001");
        assert_eq!(response.patient.id, patient.id);
        assert_eq!(response.patient.full_name, "Asha Rao");
        // 12-hour clock rendering, e.g. "03:45 PM".
        assert!(response.entry_date.ends_with("AM") || response.entry_date.ends_with("PM"));

        let bills = state.store.bills_for_visits(&[response.id]).await.unwrap();
        assert_eq!(bills.len(), 1);
        let bill = &bills[0];
        assert_eq!(bill.code, "B-001");
        assert_eq!(bill.visit_id, response.id);
        assert_eq!(bill.payment_status, BillStatus::Unpaid);
        assert_eq!(bill.total_amount, 0.0);
        assert!(bill.treatments.is_empty());
    }

    #[tokio::test]
    async fn should_continue_numbering_from_existing_counters() {
        let state = state();
        let patient = registered_patient(&state).await;

        // Visits counter at 2, bills counter at 7.
        for _ in 0..2 {
            state.allocator.allocate("visits").await.unwrap();
        }
        for _ in 0..7 {
            state.allocator.allocate("bills").await.unwrap();
        }

        let response = create_visit(&state, new_visit(&patient.id.to_string()))
            .await
            .unwrap();
        assert_eq!(response.code, "V-003");

        let bills = state.store.bills_for_visits(&[response.id]).await.unwrap();
        assert_eq!(bills[0].code, "B-008");
        assert_eq!(bills[0].payment_status, BillStatus::Unpaid);
    }

    #[tokio::test]
    async fn should_stamp_payment_date_only_on_paid_status() {
        let state = state();
        let patient = registered_patient(&state).await;
        let visit = create_visit(&state, new_visit(&patient.id.to_string()))
            .await
            .unwrap();
        let bill_id = state.store.bills_for_visits(&[visit.id]).await.unwrap()[0].id;

        // Unpaid update with a caller-supplied date: timestamp stays unset.
        let updated = update_bill(
            &state,
            bill_id,
            BillUpdate {
                treatments: vec![],
                total_amount: 250.0,
                payment_status: BillStatus::Unpaid,
                payment_method: None,
                medical_remark: Some("follow-up in a week".to_string()),
                payment_date: Some(Utc::now() - TimeDelta::days(10)),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.payment_status, BillStatus::Unpaid);
        assert!(updated.payment_date.is_none());
        assert_eq!(updated.total_amount, 250.0);

        // Paid update: server stamps "now", ignoring the supplied date.
        let supplied = Utc::now() - TimeDelta::days(10);
        let paid = update_bill(
            &state,
            bill_id,
            BillUpdate {
                treatments: vec![TreatmentLine {
                    treatment_id: Uuid::new_v4(),
                    name: "Ultrasound".to_string(),
                    cost: 250.0,
                }],
                total_amount: 250.0,
                payment_status: BillStatus::Paid,
                payment_method: Some("Cash".to_string()),
                medical_remark: None,
                payment_date: Some(supplied),
            },
        )
        .await
        .unwrap();
        assert_eq!(paid.payment_status, BillStatus::Paid);
        let stamped = paid.payment_date.unwrap();
        assert_ne!(stamped, supplied);
        assert!(Utc::now() - stamped < TimeDelta::minutes(1));

        // Reverting to Unpaid leaves the prior stamp untouched.
        let reverted = update_bill(
            &state,
            bill_id,
            BillUpdate {
                treatments: vec![],
                total_amount: 250.0,
                payment_status: BillStatus::Unpaid,
                payment_method: None,
                medical_remark: None,
                payment_date: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(reverted.payment_date, Some(stamped));
    }

    #[tokio::test]
    async fn should_report_not_found_for_absent_bill() {
        let state = state();
        let err = update_bill(
            &state,
            Uuid::new_v4(),
            BillUpdate {
                treatments: vec![],
                total_amount: 0.0,
                payment_status: BillStatus::Unpaid,
                payment_method: None,
                medical_remark: None,
                payment_date: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ClinicError::NotFound(_)));
    }
}
