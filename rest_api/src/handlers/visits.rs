// rest_api/src/handlers/visits.rs

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use models::{ClinicError, NewVisit, VisitResponse, clinic_time};
use storage::ClinicStore;

use crate::handlers::parse_entity_id;
use crate::{AppState, RestApiError, workflow};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_visit))
        .route("/today", get(get_todays_visits))
        .route("/by-patient/:patient_id", get(get_visits_by_patient))
}

/// Creates a visit for a patient together with its unpaid bill.
async fn create_visit(
    State(state): State<AppState>,
    Json(payload): Json<NewVisit>,
) -> Result<(StatusCode, Json<VisitResponse>), RestApiError> {
    let response = workflow::create_visit(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// All visits with a clinic-local entry date of today, patient embedded,
/// entry time rendered on a 12-hour clock.
async fn get_todays_visits(
    State(state): State<AppState>,
) -> Result<Json<Vec<VisitResponse>>, RestApiError> {
    let today = clinic_time::today_bounds();
    let visits = state.store.visits_between(today).await?;

    let mut responses = Vec::with_capacity(visits.len());
    for visit in visits {
        // Visits whose patient was deleted are dropped, as a join would.
        let Some(patient) = state.store.get_patient(visit.patient_id).await? else {
            continue;
        };
        let entry_time = clinic_time::format_entry_time(&visit.entry_date);
        responses.push(VisitResponse::new(&visit, &patient, entry_time));
    }
    Ok(Json(responses))
}

/// Visit history for one patient, entry dates rendered as calendar days.
async fn get_visits_by_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<VisitResponse>>, RestApiError> {
    let id = parse_entity_id("patient", &patient_id)?;
    let patient = state
        .store
        .get_patient(id)
        .await?
        .ok_or_else(|| ClinicError::not_found("Patient", &patient_id))?;

    let visits = state.store.visits_by_patient(id).await?;
    let responses = visits
        .iter()
        .map(|visit| {
            let entry_date = clinic_time::format_entry_date(&visit.entry_date);
            VisitResponse::new(visit, &patient, entry_date)
        })
        .collect();
    Ok(Json(responses))
}
