use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Application health status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthChecks {
    pub api: String,
    pub database: String,
    pub sintegra_token: String,
}

/// Health check endpoint handler
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = state.uptime_seconds();

    let health = HealthStatus {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        checks: HealthChecks {
            api: "ok".to_string(),
            database: if state.pool.is_some() {
                "configured".to_string()
            } else {
                "not configured".to_string()
            },
            sintegra_token: if state.settings.sintegra_token.is_some() {
                "configured".to_string()
            } else {
                "not configured".to_string()
            },
        },
    };

    info!(
        "Health check requested - status: healthy, uptime: {}s",
        uptime
    );
    (StatusCode::OK, Json(health))
}

/// Initialize tracing subscriber for structured logging
pub fn init_tracing() {
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "forms_brasil=info,tower_http=info".to_string());

    let filter_clone = filter.clone();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .json()
        .init();

    info!("Tracing initialized with filter: {}", filter_clone);
}
