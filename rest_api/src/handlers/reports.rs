// rest_api/src/handlers/reports.rs

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;

use models::FullReport;

use crate::{AppState, RestApiError, queries};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_full_report))
}

#[derive(Debug, Deserialize)]
struct ReportParams {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

/// Full report for a clinic-local date range (inclusive on both ends).
async fn get_full_report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<FullReport>, RestApiError> {
    let report =
        queries::full_report(state.store.as_ref(), params.start_date, params.end_date).await?;
    Ok(Json(report))
}
