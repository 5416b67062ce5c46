mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use config::Settings;
use core::{Matcher, Portfolio};
use models::PreferenceProfile;
use routes::jobs::AppState;
use services::{JobStore, LlmClient};
use std::sync::Arc;
use tracing::{error, info, warn};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST),
        )
        .content_type("application/json")
        .body(serde_json::to_string(self).unwrap_or_default())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// Load the preference profile: named settings document first, YAML file as
/// the fallback. A profile that fails validation is fatal.
async fn load_preferences(store: &JobStore, settings: &config::PreferenceSettings) -> PreferenceProfile {
    match store.load_config_doc(&settings.config_name).await {
        Ok(Some(document)) => match PreferenceProfile::from_value(document) {
            Ok(profile) => {
                info!("Loaded preference profile from settings document '{}'", settings.config_name);
                return profile;
            }
            Err(e) => {
                error!("Settings document '{}' is not a valid profile: {}", settings.config_name, e);
                panic!("Preference profile error: {}", e);
            }
        },
        Ok(None) => {
            info!(
                "No settings document '{}', falling back to {}",
                settings.config_name, settings.file
            );
        }
        Err(e) => {
            warn!("Failed to read settings document, falling back to file: {}", e);
        }
    }

    PreferenceProfile::from_file(&settings.file).unwrap_or_else(|e| {
        error!("Failed to load preference profile from {}: {}", settings.file, e);
        panic!("Preference profile error: {}", e);
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting gigmatch job matching service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize the job store
    let store = Arc::new(
        JobStore::from_settings(
            &settings.database.url,
            settings.database.max_connections,
            settings.database.min_connections,
        )
        .await
        .unwrap_or_else(|e| {
            error!("Failed to connect to PostgreSQL: {}", e);
            panic!("PostgreSQL connection error: {}", e);
        }),
    );

    info!("Job store initialized");

    // Initialize the completion client
    let llm = Arc::new(
        LlmClient::new(
            settings.llm.base_url.clone(),
            settings.llm.api_key.clone(),
            settings.llm.model.clone(),
            settings.llm.max_tokens,
            settings.llm.temperature,
            settings.llm.max_retries,
        )
        .unwrap_or_else(|e| {
            error!("Failed to build completion client: {}", e);
            panic!("Completion client error: {}", e);
        }),
    );

    info!("Completion client initialized (model: {})", settings.llm.model);

    // Load the preference profile (DB document first, file fallback)
    let preferences = load_preferences(&store, &settings.preferences).await;
    let threshold = preferences.effective_threshold(core::DEFAULT_THRESHOLD);
    let matcher = Matcher::new(preferences);

    info!("Matcher initialized (threshold: {})", threshold);

    // Load the portfolio used for proposal generation
    let portfolio = Portfolio::from_file(&settings.preferences.portfolio_file).unwrap_or_else(|e| {
        error!(
            "Failed to load portfolio from {}: {}",
            settings.preferences.portfolio_file, e
        );
        panic!("Portfolio error: {}", e);
    });

    info!("Portfolio loaded ({} projects)", portfolio.projects.len());

    // Build application state
    let app_state = AppState {
        store,
        llm,
        matcher,
        portfolio,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
