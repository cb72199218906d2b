//! Job Aggregator Server
//!
//! Exposes a single trigger endpoint that runs the search-and-append
//! pipeline and reports how many postings were fetched.

use aggregator::JobAggregator;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use common::{AggregatorError, AppConfig};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Body for a successful run
#[derive(Debug, Serialize)]
struct RunJobsResponse {
    status: &'static str,
    jobs_fetched: usize,
}

/// Body for a failed run
#[derive(Debug, Serialize)]
struct ErrorResponse {
    status: &'static str,
    error: String,
}

/// Shared application state
struct AppState {
    aggregator: JobAggregator,
}

/// Any pipeline failure, rendered as a 500.
struct ApiError(AggregatorError);

impl From<AggregatorError> for ApiError {
    fn from(err: AggregatorError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let stage = match &self.0 {
            AggregatorError::Configuration(_) => "configuration",
            AggregatorError::CredentialNotFound { .. } => "credentials",
            AggregatorError::SearchRequestFailed { .. } | AggregatorError::SearchUnavailable(_) => {
                "search"
            }
            AggregatorError::SheetWriteFailed(_) => "sheet",
        };
        error!(stage, error = %self.0, "Job aggregation failed");

        let body = ErrorResponse {
            status: "error",
            error: self.0.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Handler for GET /run-jobs
async fn run_jobs_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RunJobsResponse>, ApiError> {
    let results = state.aggregator.run_job_aggregation().await?;

    Ok(Json(RunJobsResponse {
        status: "success",
        jobs_fetched: results.len(),
    }))
}

/// Handler for GET / (root)
async fn root_handler() -> &'static str {
    "🔍 Job Aggregator API\n\nEndpoints:\n  GET /run-jobs - Search job boards and append new postings to the sheet\n\nExample:\n  curl 'http://127.0.0.1:10000/run-jobs'"
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/run-jobs", get(run_jobs_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("🚀 Starting Job Aggregator Server...\n");

    // Refuses to start without SERPAPI_KEY
    let config = AppConfig::from_env()?;

    let state = Arc::new(AppState {
        aggregator: JobAggregator::from_config(&config),
    });
    let app = build_router(state);

    let addr = "0.0.0.0:10000";
    println!("🌐 Server running at http://{}", addr);
    println!("   Try: curl 'http://127.0.0.1:10000/run-jobs'\n");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
