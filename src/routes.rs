use crate::handlers::{
    bancos_handler, cep_handler, sintegra_handler, submit_handler, submit_multipart_handler,
    MAX_BODY_BYTES,
};
use crate::observability::health_handler;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/submit", post(submit_handler))
        .route("/submit-multipart", post(submit_multipart_handler))
        .route("/sintegra", get(sintegra_handler))
        .route("/cep", get(cep_handler))
        .route("/bancos", get(bancos_handler));

    // The front end historically lives under both prefixes.
    Router::new()
        .nest("/api", api.clone())
        .nest("/forms-brasil/api", api)
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
