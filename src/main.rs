use axum::http::Method;
use forms_brasil::config::Settings;
use forms_brasil::observability::init_tracing;
use forms_brasil::routes::create_router;
use forms_brasil::state::AppState;
use forms_brasil::types::{Bank, CepInfo, SintegraInfo, SubmissionForm, SubmitResponse};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        forms_brasil::handlers::submit_handler,
        forms_brasil::handlers::sintegra_handler,
        forms_brasil::handlers::cep_handler,
        forms_brasil::handlers::bancos_handler
    ),
    components(schemas(SubmissionForm, SubmitResponse, SintegraInfo, CepInfo, Bank)),
    tags(
        (name = "Submissions", description = "Company-registration form intake"),
        (name = "Lookups", description = "Tax-registry, postal-code and bank-list lookups")
    ),
    info(
        title = "Forms Brasil API",
        description = "Backend for Brazilian company-registration submissions",
        version = "1.0.0"
    )
)]
struct ApiDoc;

async fn connect_pool(settings: &Settings) -> Option<PgPool> {
    let url = match &settings.database_url {
        Some(url) => url,
        None => {
            warn!("DATABASE_URL not set; submissions and bank list are disabled");
            return None;
        }
    };

    match PgPoolOptions::new().max_connections(5).connect_lazy(url) {
        Ok(pool) => {
            if let Err(e) = sqlx::migrate!().run(&pool).await {
                warn!("Could not apply migrations at startup: {}", e);
            }
            Some(pool)
        }
        Err(e) => {
            warn!("Invalid DATABASE_URL, database disabled: {}", e);
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let settings = Settings::from_env();
    let port = settings.port;
    let pool = connect_pool(&settings).await;
    let state = AppState::new(settings, pool);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let app = create_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(RequestBodyLimitLayer::new(forms_brasil::handlers::MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Forms Brasil backend listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
