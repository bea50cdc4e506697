use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod config;
mod error;
mod models;
mod routes;

use adapters::{SignalWireClient, SignalWireConfig};
use application::{CallService, PlatformProvider, TokenService};
use config::ServerConfig;
use swdialer::PlatformClient;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<TokenService>,
    pub call_service: Arc<CallService>,
    pub platform: Arc<PlatformProvider>,
}

impl AppState {
    pub fn new(platform: Arc<PlatformProvider>) -> Self {
        Self {
            token_service: Arc::new(TokenService::new(Arc::clone(&platform))),
            call_service: Arc::new(CallService::new(Arc::clone(&platform))),
            platform,
        }
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn cors_layer(frontend_url: &str) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = frontend_url
        .parse()
        .with_context(|| format!("FRONTEND_URL is not a valid origin: {}", frontend_url))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("🛑 Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    init_tracing(config.debug);

    tracing::info!("📞 SWDialer API initializing...");

    // Client construction is deferred to first use; only report here
    match SignalWireConfig::from_env() {
        Ok(sw) => tracing::info!("🔐 SignalWire space configured: {}", sw.space_name),
        Err(e) => tracing::warn!("⚠️  {} - token issuance disabled until set", e),
    }

    let platform = Arc::new(PlatformProvider::new(|| {
        SignalWireClient::from_env().map(|client| Arc::new(client) as Arc<dyn PlatformClient>)
    }));

    let state = AppState::new(platform);

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(routes::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.frontend_url)?)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("🌐 CORS origin: {}", config.frontend_url);
    tracing::info!("✅ SWDialer API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
