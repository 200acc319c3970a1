// rest_api/src/handlers/patients.rs

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use tracing::info;

use models::{ClinicError, CodePrefix, NewPatient, Patient};
use storage::ClinicStore;

use crate::handlers::parse_entity_id;
use crate::{AppState, RestApiError};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_patient).get(get_all_patients))
        .route(
            "/:patient_id",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
}

/// Registers a patient: draws the next `patients` sequence number, formats
/// the `PT-NNN` code, and stores the record.
async fn create_patient(
    State(state): State<AppState>,
    Json(payload): Json<NewPatient>,
) -> Result<(StatusCode, Json<Patient>), RestApiError> {
    let code = state.allocator.next_code(CodePrefix::Patient).await?;
    let patient = Patient::from_new(code, payload);
    state.store.insert_patient(&patient).await?;
    info!("registered patient {}", patient.code);
    Ok((StatusCode::CREATED, Json(patient)))
}

async fn get_all_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Patient>>, RestApiError> {
    Ok(Json(state.store.list_patients().await?))
}

async fn get_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Patient>, RestApiError> {
    let id = parse_entity_id("patient", &patient_id)?;
    let patient = state
        .store
        .get_patient(id)
        .await?
        .ok_or_else(|| ClinicError::not_found("Patient", &patient_id))?;
    Ok(Json(patient))
}

async fn update_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    Json(payload): Json<NewPatient>,
) -> Result<Json<Patient>, RestApiError> {
    let id = parse_entity_id("patient", &patient_id)?;
    let mut patient = state
        .store
        .get_patient(id)
        .await?
        .ok_or_else(|| ClinicError::not_found("Patient", &patient_id))?;
    patient.apply(payload);
    if !state.store.update_patient(&patient).await? {
        return Err(ClinicError::not_found("Patient", &patient_id).into());
    }
    Ok(Json(patient))
}

/// Deletes a patient. Existing visits and bills keep their references and
/// are left dangling; this is the documented (non-cascading) behavior.
async fn delete_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<StatusCode, RestApiError> {
    let id = parse_entity_id("patient", &patient_id)?;
    if !state.store.delete_patient(id).await? {
        return Err(ClinicError::not_found("Patient", &patient_id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
