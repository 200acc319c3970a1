// rest_api/src/handlers/billing.rs

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use models::{BillResponse, BillStatus, BillUpdate, ClinicError, clinic_time};
use storage::ClinicStore;

use crate::handlers::parse_entity_id;
use crate::{AppState, RestApiError, queries, workflow};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(get_pending_bills))
        .route("/paid-today", get(get_paid_today_bills))
        .route("/by-patient/:patient_id", get(get_bills_by_patient))
        .route("/:bill_id", get(get_bill).put(update_bill))
}

async fn get_pending_bills(
    State(state): State<AppState>,
) -> Result<Json<Vec<BillResponse>>, RestApiError> {
    let bills = state.store.bills_by_status(BillStatus::Unpaid).await?;
    Ok(Json(queries::join_bills(state.store.as_ref(), bills).await?))
}

async fn get_paid_today_bills(
    State(state): State<AppState>,
) -> Result<Json<Vec<BillResponse>>, RestApiError> {
    let today = clinic_time::today_bounds();
    let bills = state.store.bills_paid_between(today).await?;
    Ok(Json(queries::join_bills(state.store.as_ref(), bills).await?))
}

/// All bills for a patient, found via the patient's visits. An unknown
/// (but well-formed) patient id yields an empty list.
async fn get_bills_by_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<BillResponse>>, RestApiError> {
    let id = parse_entity_id("patient", &patient_id)?;
    let visit_ids: Vec<Uuid> = state
        .store
        .visits_by_patient(id)
        .await?
        .iter()
        .map(|v| v.id)
        .collect();
    let bills = state.store.bills_for_visits(&visit_ids).await?;
    Ok(Json(queries::join_bills(state.store.as_ref(), bills).await?))
}

async fn get_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<String>,
) -> Result<Json<BillResponse>, RestApiError> {
    let id = parse_entity_id("bill", &bill_id)?;
    let bill = state
        .store
        .get_bill(id)
        .await?
        .ok_or_else(|| ClinicError::not_found("Bill", &bill_id))?;
    // A bill whose visit or patient is gone cannot be displayed either.
    let response = queries::join_bill(state.store.as_ref(), bill)
        .await?
        .ok_or_else(|| ClinicError::not_found("Bill", &bill_id))?;
    Ok(Json(response))
}

async fn update_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<String>,
    Json(payload): Json<BillUpdate>,
) -> Result<Json<BillResponse>, RestApiError> {
    let id = parse_entity_id("bill", &bill_id)?;
    let bill = workflow::update_bill(&state, id, payload).await?;
    let response = queries::join_bill(state.store.as_ref(), bill)
        .await?
        .ok_or_else(|| ClinicError::not_found("Bill", &bill_id))?;
    Ok(Json(response))
}
