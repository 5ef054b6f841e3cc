use anyhow::Result;
use enfermedad_predictor::{config::Config, http::start_http_server, store::CsvStore};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(config.runtime.log_level.as_str())
        .with_ansi(false)
        .init();

    info!("Starting enfermedad-predictor");
    info!(
        "Prediction log: {}, bind: {}",
        config.storage.log_path.display(),
        config.server.http_bind
    );

    let store = Arc::new(CsvStore::new(config.storage.log_path.clone()));
    start_http_server(&config, store).await?;

    Ok(())
}
