//! HTTP transport module for enfermedad-predictor
//!
//! Axum router serving the prediction form, the prediction endpoint and the
//! aggregated history. The log store is injected through [`HttpState`].

use axum::{
    Form, Json, Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::classifier::classify_with;
use crate::config::{Config, ThresholdConfig};
use crate::error::Result;
use crate::history::{HistorySummary, summarize};
use crate::model::{PredictionForm, PredictionInput, PredictionRecord};
use crate::render;
use crate::store::PredictionStore;

/// Shared state for HTTP server
#[derive(Clone)]
pub struct HttpState {
    pub store: Arc<dyn PredictionStore>,
    pub thresholds: Arc<ThresholdConfig>,
}

impl HttpState {
    pub fn new(store: Arc<dyn PredictionStore>, thresholds: ThresholdConfig) -> Self {
        Self {
            store,
            thresholds: Arc::new(thresholds),
        }
    }
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    "ok"
}

/// Form page
pub async fn index_handler() -> Html<String> {
    Html(render::index_page())
}

/// Classify the submitted values, append them to the log and render the category
pub async fn predict_handler(
    State(state): State<HttpState>,
    Form(form): Form<PredictionForm>,
) -> Result<Html<String>> {
    let input = PredictionInput::try_from(form)?;
    let categoria = classify_with(&input, &state.thresholds);
    tracing::info!(
        pcr = input.pcr,
        fc = input.fc,
        edad = input.edad,
        categoria = %categoria,
        "prediction"
    );

    state
        .store
        .append(&PredictionRecord::new(input, categoria))
        .await?;

    Ok(Html(render::prediction_page(&input, categoria)))
}

async fn load_summary(state: &HttpState) -> Result<HistorySummary> {
    let records = state.store.read_all().await?;
    Ok(summarize(&records))
}

/// History page
pub async fn history_handler(State(state): State<HttpState>) -> Result<Html<String>> {
    let summary = load_summary(&state).await?;
    Ok(Html(render::history_page(&summary)))
}

/// History summary as JSON
pub async fn history_json_handler(
    State(state): State<HttpState>,
) -> Result<Json<HistorySummary>> {
    Ok(Json(load_summary(&state).await?))
}

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/predecir", post(predict_handler))
        .route("/historial", get(history_handler))
        .route("/api/historial", get(history_json_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_http_server(
    config: &Config,
    store: Arc<dyn PredictionStore>,
) -> anyhow::Result<()> {
    let app = router(HttpState::new(store, config.thresholds.clone()));

    let listener = tokio::net::TcpListener::bind(config.server.http_bind).await?;
    tracing::info!(
        "HTTP server listening on http://{}",
        config.server.http_bind
    );
    axum::serve(listener, app).await?;
    Ok(())
}
