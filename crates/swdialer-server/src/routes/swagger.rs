//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    // Call models
    ActiveCallsResponse,
    CallHistoryResponse,
    CallRecordResponse,
    CallResponse,
    DialRequest,
    // Status models
    ErrorResponse,
    HealthChecks,
    HealthResponse,
    IncomingCallResponse,
    IncomingCallWebhook,
    // Auth models
    IssueTokenRequest,
    RefreshTokenRequest,
    ServiceInfo,
    TokenGrantResponse,
    TokenResponse,
    ValidateTokenRequest,
    ValidateTokenResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Status endpoints
        super::status::index,
        super::status::health,
        // Auth endpoints
        super::auth::issue_token,
        super::auth::refresh_token,
        super::auth::validate_token,
        // Call endpoints
        super::calls::dial,
        super::calls::incoming,
        super::calls::call_status,
        super::calls::end_call,
        super::calls::call_history,
        super::calls::active_calls,
    ),
    info(
        title = "SWDialer API",
        version = "0.1.0",
        description = "SignalWire dialer backend\n\nIssues subscriber tokens for the browser dialer and keeps an in-memory log of calls.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Status", description = "Service info and health"),
        (name = "Auth", description = "Auth - Subscriber tokens for the browser SDK"),
        (name = "Calls", description = "Calls - Active calls and bounded history"),
    ),
    components(
        schemas(
            // Status
            ServiceInfo,
            HealthChecks,
            HealthResponse,
            ErrorResponse,
            // Auth
            IssueTokenRequest,
            RefreshTokenRequest,
            ValidateTokenRequest,
            TokenGrantResponse,
            TokenResponse,
            ValidateTokenResponse,
            // Calls
            DialRequest,
            IncomingCallWebhook,
            CallRecordResponse,
            CallResponse,
            IncomingCallResponse,
            CallHistoryResponse,
            ActiveCallsResponse,
        )
    ),
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/",
            "/health",
            "/api/auth/token",
            "/api/auth/refresh",
            "/api/auth/validate",
            "/api/calls/dial",
            "/api/calls/incoming",
            "/api/calls/status/{id}",
            "/api/calls/end/{id}",
            "/api/calls/history",
            "/api/calls/active",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }
}
