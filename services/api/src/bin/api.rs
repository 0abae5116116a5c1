//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{DbAdapter, GeminiAdapter, GoogleTranslateAdapter, InMemoryUserStore},
    config::Config,
    error::ApiError,
    web::{api_router, state::AppState, ApiDoc},
};
use axum::http::{header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE}, HeaderValue, Method};
use axum::Router;
use medisign_core::{
    ports::{TranslationService, UserRecordStore},
    Onboarding, ResilientGenerator,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Select the Record Store ---
    let store: Arc<dyn UserRecordStore> = match &config.database_url {
        Some(database_url) => {
            info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            let db_adapter = DbAdapter::new(db_pool);
            info!("Running database migrations...");
            db_adapter.run_migrations().await?;
            info!("Database migrations complete.");
            Arc::new(db_adapter)
        }
        None => {
            warn!("DATABASE_URL not set; onboarding records will be kept in memory.");
            Arc::new(InMemoryUserStore::new())
        }
    };

    // --- 3. Initialize Service Adapters ---
    let generation = &config.generation;
    let client = reqwest::Client::builder()
        .timeout(generation.timeout)
        .build()?;
    let generator = match GeminiAdapter::new(client, generation) {
        Some(gemini) => {
            info!(endpoint = gemini.endpoint(), "Gemini generation enabled");
            ResilientGenerator::new(Arc::new(gemini), generation.timeout)
        }
        None => {
            warn!("GEMINI_API_KEY not set; every message will be a fallback.");
            ResilientGenerator::disabled()
        }
    };

    let translation = &config.translation;
    let translator: Option<Arc<dyn TranslationService>> = match &translation.project_id {
        Some(project_id) => {
            let client = reqwest::Client::builder()
                .timeout(translation.timeout)
                .build()?;
            Some(Arc::new(GoogleTranslateAdapter::new(client, translation, project_id)))
        }
        None => {
            warn!("GCLOUD_PROJECT not set; translateText will fail.");
            None
        }
    };

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        onboarding: Onboarding::new(generator, translator, store),
    });

    let allowed_origin = config
        .cors_allowed_origin
        .parse::<HeaderValue>()
        .map_err(|e| ApiError::Internal(format!("Invalid CORS_ALLOWED_ORIGIN: {}", e)))?;
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router(app_state).layer(cors))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
