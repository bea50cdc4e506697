//! Auth - Subscriber token DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use swdialer::TokenGrant;

// ============================================
// Request DTOs
// ============================================

/// Issue token request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct IssueTokenRequest {
    /// Optional subscriber identity hint
    pub subscriber_id: Option<String>,
    /// Token reference label (defaults to "swdialer")
    pub reference: Option<String>,
}

/// Refresh token request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RefreshTokenRequest {
    /// Previous token (not checked)
    pub token: Option<String>,
}

/// Validate token request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ValidateTokenRequest {
    pub token: Option<String>,
}

// ============================================
// Response DTOs
// ============================================

/// Subscriber token
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenGrantResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub expires_in: u64,
    pub subscriber_id: Option<String>,
    pub reference: String,
    pub project_id: String,
    pub space_name: String,
}

impl From<TokenGrant> for TokenGrantResponse {
    fn from(grant: TokenGrant) -> Self {
        Self {
            token: grant.token,
            expires_at: grant.expires_at,
            expires_in: grant.expires_in,
            subscriber_id: grant.subscriber_id,
            reference: grant.reference,
            project_id: grant.project_id,
            space_name: grant.space_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub success: bool,
    pub data: TokenGrantResponse,
}

impl From<TokenGrant> for TokenResponse {
    fn from(grant: TokenGrant) -> Self {
        Self {
            success: true,
            data: grant.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidateTokenResponse {
    pub success: bool,
    pub valid: bool,
    pub message: String,
}
