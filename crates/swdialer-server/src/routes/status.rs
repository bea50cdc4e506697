//! Status Routes - Service info, health and unmatched paths

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;

use crate::models::{ErrorResponse, HealthChecks, HealthResponse, ServiceInfo};
use crate::AppState;

/// Service info
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is online", body = ServiceInfo)
    ),
    tag = "Status"
)]
pub async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        status: "online".to_string(),
        service: "SignalWire Dialer Backend".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Health check
///
/// Degraded when the platform client cannot be built.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Healthy", body = HealthResponse),
        (status = 503, description = "Platform not configured", body = HealthResponse)
    ),
    tag = "Status"
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if !state.platform.is_ready() {
        tracing::debug!("Health check triggering platform client construction");
    }
    let config_ok = state.platform.get().await.is_ok();

    let (status, label) = if config_ok {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            checks: HealthChecks {
                server: true,
                config: config_ok,
                timestamp: Utc::now(),
            },
        }),
    )
}

pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            success: false,
            error: "Endpoint not found".to_string(),
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};

    use crate::application::testing::{ready_provider, unconfigured_provider, MockPlatform};
    use crate::routes::testing::{app, send};

    #[tokio::test]
    async fn test_index() {
        let app = app(unconfigured_provider());

        let (status, body) = send(&app, Method::GET, "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "online");
        assert_eq!(body["service"], "SignalWire Dialer Backend");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_health_configured() {
        let app = app(ready_provider(Arc::new(MockPlatform::default())));

        let (status, body) = send(&app, Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["checks"]["server"], true);
        assert_eq!(body["checks"]["config"], true);
    }

    #[tokio::test]
    async fn test_health_unconfigured() {
        let app = app(unconfigured_provider());

        let (status, body) = send(&app, Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["checks"]["config"], false);
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let app = app(unconfigured_provider());

        let (status, body) = send(&app, Method::GET, "/api/nowhere", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Endpoint not found");
    }
}
