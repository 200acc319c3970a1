// rest_api/src/queries.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use models::{
    Bill, BillResponse, BillStatus, ClinicResult, DashboardStats, FullReport, NewPatientReportRow,
    PatientName, PaymentReportRow, ReportSummary, ServiceReportRow, VisitSummary, clinic_time,
};
use storage::ClinicStore;

/// Read-side projection layer: composes single-record reads into the
/// joined display shapes (bill ↔ visit ↔ patient) and the report/dashboard
/// aggregates. Nothing denormalized is persisted, so there is no staleness
/// concern, only composition correctness.
///
/// Joins follow the lookup-and-unwind convention: a bill whose visit or
/// patient is missing (e.g. after a patient delete) is dropped from list
/// results rather than failing them.
pub async fn join_bill(store: &dyn ClinicStore, bill: Bill) -> ClinicResult<Option<BillResponse>> {
    let Some(visit) = store.get_visit(bill.visit_id).await? else {
        return Ok(None);
    };
    let Some(patient) = store.get_patient(visit.patient_id).await? else {
        return Ok(None);
    };

    Ok(Some(BillResponse {
        id: bill.id,
        code: bill.code,
        total_amount: bill.total_amount,
        payment_status: bill.payment_status,
        payment_method: bill.payment_method,
        medical_remark: bill.medical_remark,
        payment_date: bill.payment_date,
        treatments: bill.treatments,
        visit: VisitSummary {
            id: visit.id,
            code: visit.code,
            entry_date: visit.entry_date,
        },
        patient: PatientName {
            full_name: patient.full_name,
        },
    }))
}

pub async fn join_bills(
    store: &dyn ClinicStore,
    bills: Vec<Bill>,
) -> ClinicResult<Vec<BillResponse>> {
    let mut responses = Vec::with_capacity(bills.len());
    for bill in bills {
        if let Some(response) = join_bill(store, bill).await? {
            responses.push(response);
        }
    }
    Ok(responses)
}

/// Full report over a clinic-local date range: headline figures plus the
/// payments, per-service, and new-patients tables.
pub async fn full_report(
    store: &dyn ClinicStore,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> ClinicResult<FullReport> {
    let range = clinic_time::range_bounds(start_date, end_date);

    let paid_bills = store.bills_paid_between(range).await?;
    let new_patients = store.patients_registered_between(range).await?;
    let total_visits = store.visits_between(range).await?.len() as u64;

    let summary = ReportSummary {
        total_revenue: paid_bills.iter().map(|b| b.total_amount).sum(),
        new_patients: new_patients.len() as u64,
        total_visits,
    };

    let mut payments = Vec::new();
    for bill in &paid_bills {
        let Some(visit) = store.get_visit(bill.visit_id).await? else {
            continue;
        };
        let Some(patient) = store.get_patient(visit.patient_id).await? else {
            continue;
        };
        let Some(payment_date) = bill.payment_date else {
            continue;
        };
        payments.push(PaymentReportRow {
            bill_code: bill.code.clone(),
            patient_name: patient.full_name,
            payment_date,
            amount: bill.total_amount,
            payment_method: bill.payment_method.clone().unwrap_or_default(),
        });
    }

    // Group applied treatment snapshots by name across paid bills.
    let mut by_service: BTreeMap<String, (u64, f64)> = BTreeMap::new();
    for bill in &paid_bills {
        for line in &bill.treatments {
            let entry = by_service.entry(line.name.clone()).or_default();
            entry.0 += 1;
            entry.1 += line.cost;
        }
    }
    let services = by_service
        .into_iter()
        .map(|(service_name, (times_performed, total_revenue))| ServiceReportRow {
            service_name,
            times_performed,
            total_revenue,
        })
        .collect();

    let new_patient_rows = new_patients
        .into_iter()
        .map(|p| NewPatientReportRow {
            patient_code: p.code,
            full_name: p.full_name,
            contact_number: p.contact_number,
            date_registered: p.date_registered,
        })
        .collect();

    Ok(FullReport {
        summary,
        payments,
        services,
        new_patients: new_patient_rows,
    })
}

/// Key figures for the clinic-local current day. "Completed" visits are
/// today's visits whose bill has been paid.
pub async fn dashboard_stats(store: &dyn ClinicStore) -> ClinicResult<DashboardStats> {
    let today = clinic_time::today_bounds();

    let todays_visits = store.visits_between(today).await?;
    let total_visits = todays_visits.len() as u64;

    let pending = store.bills_by_status(BillStatus::Unpaid).await?;
    let pending_bills = pending.len() as u64;
    let amount_due = pending.iter().map(|b| b.total_amount).sum();

    let paid_today = store
        .bills_paid_between(today)
        .await?
        .iter()
        .map(|b| b.total_amount)
        .sum();

    let visit_ids: Vec<Uuid> = todays_visits.iter().map(|v| v.id).collect();
    let completed_visits = store
        .bills_for_visits(&visit_ids)
        .await?
        .iter()
        .filter(|b| b.payment_status == BillStatus::Paid)
        .count() as u64;

    Ok(DashboardStats {
        total_visits,
        completed_visits,
        pending_bills,
        amount_due,
        paid_today,
    })
}
