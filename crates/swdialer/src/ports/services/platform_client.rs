//! Platform Client Port
//!
//! Abstract interface to the remote communications platform. Implementations
//! hold the credentials and perform one HTTPS round trip per token request.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, phone_number, TokenGrant};

/// Reference label sent with every token request unless the caller overrides it
pub const DEFAULT_REFERENCE: &str = "swdialer";

/// Validity window of issued tokens, in seconds
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Parameters for minting a subscriber token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub subscriber_id: Option<String>,
    pub reference: String,
    pub expires_in: u64,
}

impl Default for TokenRequest {
    fn default() -> Self {
        Self {
            subscriber_id: None,
            reference: DEFAULT_REFERENCE.to_string(),
            expires_in: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

/// Service interface for the remote platform
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Mint a subscriber token with audio and video send/receive capability
    async fn mint_token(&self, request: TokenRequest) -> Result<TokenGrant, DomainError>;

    /// Issue a replacement token
    ///
    /// `old_token` is not checked against the platform; a fresh token with the
    /// default window is minted regardless.
    async fn refresh_token(
        &self,
        old_token: Option<&str>,
        reference: &str,
    ) -> Result<TokenGrant, DomainError> {
        tracing::debug!(
            "Refreshing token (previous token supplied: {})",
            old_token.is_some()
        );
        self.mint_token(TokenRequest {
            subscriber_id: None,
            reference: reference.to_string(),
            expires_in: DEFAULT_TOKEN_TTL_SECS,
        })
        .await
    }

    fn validate_number(&self, raw: &str) -> bool {
        phone_number::validate_number(raw)
    }

    fn format_number(&self, raw: &str) -> String {
        phone_number::format_number(raw)
    }
}
