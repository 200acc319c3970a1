// rest_api/src/lib.rs

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use models::ClinicError;
use storage::{ClinicStore, SequenceAllocator};

pub mod config;
pub mod handlers;
pub mod queries;
pub mod workflow;

use crate::config::RestApiConfig;

// Define the REST API error enum
#[derive(Debug, Error)]
pub enum RestApiError {
    #[error(transparent)]
    Clinic(#[from] ClinicError),
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Implement IntoResponse for RestApiError to convert it into an HTTP response
impl IntoResponse for RestApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            RestApiError::Clinic(ClinicError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg),
            RestApiError::Clinic(ClinicError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg),
            RestApiError::Clinic(err @ ClinicError::StorageUnavailable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
            RestApiError::Clinic(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            RestApiError::SerdeJson(err) => (StatusCode::BAD_REQUEST, format!("JSON error: {}", err)),
            RestApiError::Io(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("IO error: {}", err)),
        };

        let body = Json(json!({
            "status": "error",
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

// Shared state for the Axum application
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ClinicStore>,
    pub allocator: SequenceAllocator,
}

impl AppState {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        let allocator = SequenceAllocator::new(store.clone());
        AppState { store, allocator }
    }
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Clinic Back-Office API"
    }))
}

/// Assembles the full application router with permissive CORS, matching
/// the route layout consumed by the clinic front-office.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .nest("/patients", handlers::patients::router())
        .nest("/services", handlers::services::router())
        .nest("/visits", handlers::visits::router())
        .nest("/billing", handlers::billing::router())
        .nest("/reports", handlers::reports::router())
        .nest("/dashboard", handlers::dashboard::router())
        .layer(cors)
        .with_state(state)
}

/// Binds the listener and serves the application until shutdown.
pub async fn start_server(config: &RestApiConfig, state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Clinic REST API listening on http://{}", addr);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}
