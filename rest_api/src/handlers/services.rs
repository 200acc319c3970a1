// rest_api/src/handlers/services.rs

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use models::{ClinicError, NewTreatment, Treatment};
use storage::ClinicStore;

use crate::handlers::parse_entity_id;
use crate::{AppState, RestApiError};

/// Treatment catalog CRUD. Catalog entries carry no sequence code, and
/// edits never touch the snapshots already captured on bills.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_service).get(get_all_services))
        .route(
            "/:service_id",
            get(get_service).put(update_service).delete(delete_service),
        )
}

async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<NewTreatment>,
) -> Result<(StatusCode, Json<Treatment>), RestApiError> {
    let treatment = Treatment::from_new(payload);
    state.store.insert_treatment(&treatment).await?;
    Ok((StatusCode::CREATED, Json(treatment)))
}

async fn get_all_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<Treatment>>, RestApiError> {
    Ok(Json(state.store.list_treatments().await?))
}

async fn get_service(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Result<Json<Treatment>, RestApiError> {
    let id = parse_entity_id("service", &service_id)?;
    let treatment = state
        .store
        .get_treatment(id)
        .await?
        .ok_or_else(|| ClinicError::not_found("Service", &service_id))?;
    Ok(Json(treatment))
}

async fn update_service(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
    Json(payload): Json<NewTreatment>,
) -> Result<Json<Treatment>, RestApiError> {
    let id = parse_entity_id("service", &service_id)?;
    let mut treatment = state
        .store
        .get_treatment(id)
        .await?
        .ok_or_else(|| ClinicError::not_found("Service", &service_id))?;
    treatment.apply(payload);
    if !state.store.update_treatment(&treatment).await? {
        return Err(ClinicError::not_found("Service", &service_id).into());
    }
    Ok(Json(treatment))
}

async fn delete_service(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Result<StatusCode, RestApiError> {
    let id = parse_entity_id("service", &service_id)?;
    if !state.store.delete_treatment(id).await? {
        return Err(ClinicError::not_found("Service", &service_id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
