use crate::config::Settings;
use crate::error::{AppError, AppResult};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state, cloned into every handler.
///
/// The database pool is optional: when `DATABASE_URL` is not set the
/// server still serves the lookup proxies, and the database-backed
/// endpoints answer with a configuration error.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub pool: Option<PgPool>,
    pub http: reqwest::Client,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(settings: Settings, pool: Option<PgPool>) -> Self {
        Self {
            settings: Arc::new(settings),
            pool,
            http: reqwest::Client::new(),
            started_at: Instant::now(),
        }
    }

    pub fn pool(&self) -> AppResult<&PgPool> {
        self.pool
            .as_ref()
            .ok_or_else(|| AppError::ConfigMissing("DB not configured".to_string()))
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
