//! SWDialer API Routes
//!
//! - / and /health - Service info and health
//! - /api/auth - Subscriber token issuance
//! - /api/calls - Call lifecycle tracking

use axum::Router;

use crate::AppState;

pub mod auth;
pub mod calls;
pub mod status;
pub mod swagger;

/// All API routes, with a JSON 404 for anything else
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(status::router())
        .merge(auth::router())
        .merge(calls::router())
        .fallback(status::not_found)
}

#[cfg(test)]
pub mod testing {
    //! Drives the router in-process

    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use tower::ServiceExt;

    use crate::application::PlatformProvider;
    use crate::AppState;

    pub fn app(platform: Arc<PlatformProvider>) -> Router {
        super::router().with_state(AppState::new(platform))
    }

    pub async fn send_raw(
        app: &Router,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: impl Into<Body>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(body.into()).unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

        (status, json)
    }

    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        match body {
            Some(json) => {
                send_raw(app, method, uri, Some("application/json"), json.to_string()).await
            }
            None => send_raw(app, method, uri, None, Body::empty()).await,
        }
    }
}
