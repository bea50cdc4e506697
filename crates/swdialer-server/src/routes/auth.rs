//! Auth Routes - Subscriber token issuance
//!
//! HTTP handlers that delegate to TokenService. Bodies are optional: a
//! missing or unreadable body is treated as `{}`.

use axum::{extract::State, routing::post, Json, Router};

use crate::error::ApiError;
use crate::models::{
    IssueTokenRequest, RefreshTokenRequest, TokenResponse, ValidateTokenRequest,
    ValidateTokenResponse,
};
use crate::AppState;
use swdialer::DomainError;

/// Issue a subscriber token
#[utoipa::path(
    post,
    path = "/api/auth/token",
    request_body = IssueTokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 500, description = "Platform not configured or rejected the request", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn issue_token(
    State(state): State<AppState>,
    payload: Option<Json<IssueTokenRequest>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    let grant = state
        .token_service
        .issue(payload.subscriber_id, payload.reference)
        .await?;

    Ok(Json(grant.into()))
}

/// Refresh a subscriber token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed", body = TokenResponse),
        (status = 500, description = "Platform not configured or rejected the request", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    payload: Option<Json<RefreshTokenRequest>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    let grant = state.token_service.renew(payload.token).await?;

    Ok(Json(grant.into()))
}

/// Check a token
///
/// Placeholder: any non-empty token is reported valid.
#[utoipa::path(
    post,
    path = "/api/auth/validate",
    request_body = ValidateTokenRequest,
    responses(
        (status = 200, description = "Token checked", body = ValidateTokenResponse),
        (status = 400, description = "No token provided", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn validate_token(
    payload: Option<Json<ValidateTokenRequest>>,
) -> Result<Json<ValidateTokenResponse>, ApiError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    if payload.token.as_deref().map_or(true, str::is_empty) {
        return Err(DomainError::Validation("No token provided".to_string()).into());
    }

    Ok(Json(ValidateTokenResponse {
        success: true,
        valid: true,
        message: "Token validation endpoint (placeholder)".to_string(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/token", post(issue_token))
        .route("/api/auth/refresh", post(refresh_token))
        .route("/api/auth/validate", post(validate_token))
}
