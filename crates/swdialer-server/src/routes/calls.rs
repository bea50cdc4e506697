//! Call Routes - Call lifecycle tracking
//!
//! HTTP handlers that delegate to CallService for business logic.

use axum::{
    extract::{FromRequest, Path, Query, Request, State},
    http::header,
    routing::{get, post},
    Form, Json, Router,
};

use crate::error::ApiError;
use crate::models::{
    ActiveCallsResponse, CallHistoryResponse, CallResponse, DialRequest, HistoryQuery,
    IncomingCallResponse, IncomingCallWebhook,
};
use crate::AppState;
use swdialer::HistoryPage;

/// Log an outbound call
#[utoipa::path(
    post,
    path = "/api/calls/dial",
    request_body = DialRequest,
    responses(
        (status = 200, description = "Call initiated", body = CallResponse),
        (status = 400, description = "Missing or invalid phone number", body = ErrorResponse)
    ),
    tag = "Calls"
)]
pub async fn dial(
    State(state): State<AppState>,
    payload: Option<Json<DialRequest>>,
) -> Result<Json<CallResponse>, ApiError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    let call = state
        .call_service
        .start_outbound(payload.to, payload.from)
        .await?;

    Ok(Json(call.into()))
}

/// Read the webhook body as form or JSON; anything else falls back to defaults
async fn parse_webhook(request: Request) -> Result<IncomingCallWebhook, ApiError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_lowercase();

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(webhook) = Form::<IncomingCallWebhook>::from_request(request, &())
            .await
            .map_err(|e| ApiError::Internal(e.body_text()))?;
        Ok(webhook)
    } else if content_type.starts_with("application/json") {
        let Json(webhook) = Json::<IncomingCallWebhook>::from_request(request, &())
            .await
            .map_err(|e| ApiError::Internal(e.body_text()))?;
        Ok(webhook)
    } else {
        Ok(IncomingCallWebhook::default())
    }
}

/// Register an incoming call (SignalWire webhook)
#[utoipa::path(
    post,
    path = "/api/calls/incoming",
    request_body(content = IncomingCallWebhook, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Incoming call registered", body = IncomingCallResponse),
        (status = 500, description = "Unreadable webhook body", body = ErrorResponse)
    ),
    tag = "Calls"
)]
pub async fn incoming(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<IncomingCallResponse>, ApiError> {
    let webhook = parse_webhook(request).await?;

    let registration =
        state
            .call_service
            .register_inbound(webhook.call_sid, webhook.from, webhook.to);

    let message = if registration.duplicate {
        "Incoming call already registered"
    } else {
        "Incoming call registered"
    };

    Ok(Json(IncomingCallResponse {
        success: true,
        message: message.to_string(),
        call_id: registration.record.id,
    }))
}

/// Get a call, active or finished
#[utoipa::path(
    get,
    path = "/api/calls/status/{id}",
    params(("id" = String, Path, description = "Call ID")),
    responses(
        (status = 200, description = "Call found", body = CallResponse),
        (status = 404, description = "Call not found", body = ErrorResponse)
    ),
    tag = "Calls"
)]
pub async fn call_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CallResponse>, ApiError> {
    let call = state.call_service.get(&id)?;
    Ok(Json(call.into()))
}

/// Mark a call as ended
#[utoipa::path(
    post,
    path = "/api/calls/end/{id}",
    params(("id" = String, Path, description = "Call ID")),
    responses(
        (status = 200, description = "Call ended", body = CallResponse),
        (status = 404, description = "Call not found", body = ErrorResponse)
    ),
    tag = "Calls"
)]
pub async fn end_call(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CallResponse>, ApiError> {
    let call = state.call_service.end(&id)?;
    Ok(Json(call.into()))
}

/// Finished calls, most recent first
///
/// An unrecognised direction matches no calls.
#[utoipa::path(
    get,
    path = "/api/calls/history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Call history", body = CallHistoryResponse)
    ),
    tag = "Calls"
)]
pub async fn call_history(
    State(state): State<AppState>,
    query: Option<Query<HistoryQuery>>,
) -> Json<CallHistoryResponse> {
    let query = query.map(|Query(q)| q).unwrap_or_default();

    let page = match query.direction() {
        Ok(direction) => state.call_service.history(direction, query.limit()),
        Err(raw) => {
            tracing::debug!("History filter matches no direction: {}", raw);
            HistoryPage {
                calls: Vec::new(),
                total: 0,
            }
        }
    };

    Json(page.into())
}

/// Calls in progress
#[utoipa::path(
    get,
    path = "/api/calls/active",
    responses(
        (status = 200, description = "Active calls", body = ActiveCallsResponse)
    ),
    tag = "Calls"
)]
pub async fn active_calls(State(state): State<AppState>) -> Json<ActiveCallsResponse> {
    Json(state.call_service.active().into())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/calls/dial", post(dial))
        .route("/api/calls/incoming", post(incoming))
        .route("/api/calls/status/:id", get(call_status))
        .route("/api/calls/end/:id", post(end_call))
        .route("/api/calls/history", get(call_history))
        .route("/api/calls/active", get(active_calls))
}
