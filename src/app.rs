use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::routes::create_routes;
use crate::weather::{OpenWeatherClient, ScanMode, WeatherSource};

/// State shared by every request. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn WeatherSource>,
    pub scan_mode: ScanMode,
}

/// Initialize tracing and logging for the application
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "weather_chat_svc=info,tower_http=debug,axum::rejection=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Create and configure the Axum application with all routes and middleware
pub fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    info!("Initializing application router");

    if !config.has_api_key() {
        warn!("OPENWEATHERMAP_API_KEY is not set; provider requests will be rejected");
    }

    let client = OpenWeatherClient::new(config)?;
    info!("Weather provider client ready at {}", config.provider_base_url);

    Ok(build_router(AppState {
        source: Arc::new(client),
        scan_mode: config.scan_mode,
    }))
}

/// Router over an arbitrary weather source
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(create_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(cors_layer())
}

// Sent on every response, not only on preflight.
const ALLOWED_HEADERS: &str = "Content-Type,Authorization";
const ALLOWED_METHODS: &str = "GET,PUT,POST,DELETE,OPTIONS";

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
}
