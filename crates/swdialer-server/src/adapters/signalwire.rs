//! SignalWire Platform Client
//!
//! Mints Fabric subscriber tokens over the SignalWire REST API using reqwest.
//! Authenticates with the project id and API token as HTTP basic auth.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use swdialer::{DomainError, PlatformClient, TokenGrant, TokenRequest};

pub const SPACE_NAME_VAR: &str = "SPACE_NAME";
pub const PROJECT_ID_VAR: &str = "PROJECT_ID";
pub const AUTH_TOKEN_VAR: &str = "AUTH_TOKEN";

/// SignalWire credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalWireConfig {
    /// Space host, already a FQDN (e.g. `example.signalwire.com`)
    pub space_name: String,
    pub project_id: String,
    pub auth_token: String,
}

impl SignalWireConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a key lookup, failing with every missing variable named
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let space_name = get(SPACE_NAME_VAR);
        let project_id = get(PROJECT_ID_VAR);
        let auth_token = get(AUTH_TOKEN_VAR);

        match (space_name, project_id, auth_token) {
            (Some(space_name), Some(project_id), Some(auth_token)) => Ok(Self {
                space_name,
                project_id,
                auth_token,
            }),
            _ => {
                let missing: Vec<&str> = [SPACE_NAME_VAR, PROJECT_ID_VAR, AUTH_TOKEN_VAR]
                    .into_iter()
                    .filter(|key| get(*key).is_none())
                    .collect();
                Err(DomainError::Configuration(format!(
                    "Missing SignalWire configuration: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

#[derive(Serialize)]
struct MediaGrant {
    send: bool,
    receive: bool,
}

impl MediaGrant {
    fn full() -> Self {
        Self {
            send: true,
            receive: true,
        }
    }
}

#[derive(Serialize)]
struct SubscriberTokenPayload<'a> {
    reference: &'a str,
    expires_at: String,
    audio: MediaGrant,
    video: MediaGrant,
    #[serde(skip_serializing_if = "Option::is_none")]
    subscriber_id: Option<&'a str>,
}

#[derive(Deserialize)]
struct SubscriberTokenResponse {
    token: Option<String>,
    #[serde(default)]
    expires_at: Option<serde_json::Value>,
    #[serde(default)]
    subscriber_id: Option<String>,
}

/// Accepts RFC 3339 strings or unix seconds
fn parse_expiry(value: Option<&serde_json::Value>) -> Option<DateTime<Utc>> {
    match value? {
        serde_json::Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        serde_json::Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        _ => None,
    }
}

/// reqwest implementation of PlatformClient
pub struct SignalWireClient {
    client: Client,
    config: SignalWireConfig,
    api_base: String,
}

impl SignalWireClient {
    pub fn new(config: SignalWireConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("swdialer/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        let api_base = format!("https://{}/api/fabric", config.space_name);

        Self {
            client,
            config,
            api_base,
        }
    }

    /// Construct from `SPACE_NAME`, `PROJECT_ID` and `AUTH_TOKEN`
    pub fn from_env() -> Result<Self, DomainError> {
        SignalWireConfig::from_env().map(Self::new)
    }

    /// Point the client at a different API root
    #[cfg(test)]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl PlatformClient for SignalWireClient {
    async fn mint_token(&self, request: TokenRequest) -> Result<TokenGrant, DomainError> {
        let url = format!("{}/subscribers/tokens", self.api_base);
        let expires_at = Utc::now() + chrono::Duration::seconds(request.expires_in as i64);

        tracing::info!("Creating subscriber token with expiry: {}", expires_at);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.project_id, Some(&self.config.auth_token))
            .json(&SubscriberTokenPayload {
                reference: &request.reference,
                expires_at: expires_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                audio: MediaGrant::full(),
                video: MediaGrant::full(),
                subscriber_id: request.subscriber_id.as_deref(),
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Error creating subscriber token: {}", e);
                DomainError::upstream(
                    None,
                    format!("Failed to create subscriber token: {e}"),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                "Error creating subscriber token: {} - Response: {}",
                status,
                body
            );
            return Err(DomainError::upstream(
                Some(status.as_u16()),
                format!("Failed to create subscriber token: {body}"),
            ));
        }

        let data: SubscriberTokenResponse = response.json().await.map_err(|e| {
            DomainError::upstream(
                Some(status.as_u16()),
                format!("Invalid subscriber token response: {e}"),
            )
        })?;

        let token = data.token.filter(|t| !t.is_empty()).ok_or_else(|| {
            DomainError::upstream(
                Some(status.as_u16()),
                "Subscriber token response did not include a token",
            )
        })?;

        Ok(TokenGrant {
            token,
            expires_at: parse_expiry(data.expires_at.as_ref()).unwrap_or(expires_at),
            expires_in: request.expires_in,
            subscriber_id: data.subscriber_id.or(request.subscriber_id),
            reference: request.reference,
            project_id: self.config.project_id.clone(),
            space_name: self.config.space_name.clone(),
        })
    }
}
