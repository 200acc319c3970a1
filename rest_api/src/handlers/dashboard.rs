// rest_api/src/handlers/dashboard.rs

use axum::{Json, Router, extract::State, routing::get};

use models::DashboardStats;

use crate::{AppState, RestApiError, queries};

pub fn router() -> Router<AppState> {
    Router::new().route("/stats", get(get_dashboard_stats))
}

/// Key statistics for today's dashboard.
async fn get_dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, RestApiError> {
    Ok(Json(queries::dashboard_stats(state.store.as_ref()).await?))
}
