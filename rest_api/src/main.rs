// rest_api/src/main.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;

use rest_api::config::load_config;
use rest_api::{AppState, start_server};
use storage::SledStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config_path = std::env::var("CLINIC_CONFIG").ok().map(PathBuf::from);
    let config = load_config(config_path).context("Failed to load configuration")?;

    let store = SledStore::open(&config.storage.data_directory)
        .with_context(|| format!("Failed to open database at {}", config.storage.data_directory))?;
    let state = AppState::new(Arc::new(store));

    start_server(&config.rest_api, state).await
}
