//! Token Application Service (Use Case)
//!
//! Shapes dialer input into platform token requests.

use std::sync::Arc;

use swdialer::{DomainError, TokenGrant, TokenRequest, DEFAULT_REFERENCE, DEFAULT_TOKEN_TTL_SECS};

use super::PlatformProvider;

/// Application service for subscriber tokens
pub struct TokenService {
    platform: Arc<PlatformProvider>,
}

impl TokenService {
    pub fn new(platform: Arc<PlatformProvider>) -> Self {
        Self { platform }
    }

    /// Issue a new token with the default one hour window
    pub async fn issue(
        &self,
        subscriber_id: Option<String>,
        reference: Option<String>,
    ) -> Result<TokenGrant, DomainError> {
        let client = self.platform.get().await?;

        let request = TokenRequest {
            subscriber_id: subscriber_id.filter(|s| !s.is_empty()),
            reference: reference
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_REFERENCE.to_string()),
            expires_in: DEFAULT_TOKEN_TTL_SECS,
        };
        let subscriber = request.subscriber_id.clone();

        let grant = client.mint_token(request).await?;

        tracing::info!(
            "Token generated successfully for subscriber: {}",
            subscriber.as_deref().unwrap_or("anonymous")
        );

        Ok(grant)
    }

    /// Replace a token. The old token is not checked.
    pub async fn renew(&self, old_token: Option<String>) -> Result<TokenGrant, DomainError> {
        let client = self.platform.get().await?;
        let grant = client
            .refresh_token(old_token.as_deref(), DEFAULT_REFERENCE)
            .await?;

        tracing::info!("Token refreshed successfully");

        Ok(grant)
    }
}
