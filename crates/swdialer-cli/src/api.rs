//! SWDialer API Client

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// API Client for the SWDialer server
pub struct DialerClient {
    client: Client,
    base_url: String,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
pub struct TokenGrant {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub expires_in: u64,
    pub subscriber_id: Option<String>,
    pub reference: String,
    pub project_id: String,
    pub space_name: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenCheck {
    pub valid: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CallRecord {
    pub id: String,
    pub to: String,
    pub from: String,
    pub direction: String,
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration: u64,
}

#[derive(Debug, Deserialize)]
pub struct CallHistory {
    pub data: Vec<CallRecord>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct ActiveCalls {
    pub data: Vec<CallRecord>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct HealthChecks {
    pub server: bool,
    pub config: bool,
}

#[derive(Debug, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
struct IssueTokenRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    subscriber_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct TokenBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DialRequest<'a> {
    to: &'a str,
    from: &'a str,
}

/// Decode a response body, surfacing the server's `error` message on failure
fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|e| e.error)
            .unwrap_or_else(|_| body.to_string());
        bail!("API error ({}): {}", status, message);
    }

    serde_json::from_str(body).context("Failed to parse response")
}

impl DialerClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = request
            .send()
            .await
            .context("Failed to connect to SWDialer API")?;

        let status = resp.status();
        let body = resp.text().await.context("Failed to read response")?;

        decode(status, &body)
    }

    async fn call(&self, request: RequestBuilder) -> Result<CallRecord> {
        let envelope: DataEnvelope<CallRecord> = self.send(request).await?;
        Ok(envelope.data)
    }

    /// Health report; a degraded server still answers with a report
    pub async fn health(&self) -> Result<HealthReport> {
        let url = format!("{}/health", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to SWDialer API")?;

        let status = resp.status();
        let body = resp.text().await.context("Failed to read response")?;

        if status == StatusCode::SERVICE_UNAVAILABLE {
            return serde_json::from_str(&body).context("Failed to parse response");
        }
        decode(status, &body)
    }

    /// Issue a subscriber token
    pub async fn issue_token(
        &self,
        subscriber_id: Option<&str>,
        reference: Option<&str>,
    ) -> Result<TokenGrant> {
        let url = format!("{}/api/auth/token", self.base_url);
        let request = self.client.post(&url).json(&IssueTokenRequest {
            subscriber_id,
            reference,
        });

        let envelope: DataEnvelope<TokenGrant> = self.send(request).await?;
        Ok(envelope.data)
    }

    /// Refresh a subscriber token
    pub async fn refresh_token(&self, token: Option<&str>) -> Result<TokenGrant> {
        let url = format!("{}/api/auth/refresh", self.base_url);
        let request = self.client.post(&url).json(&TokenBody { token });

        let envelope: DataEnvelope<TokenGrant> = self.send(request).await?;
        Ok(envelope.data)
    }

    pub async fn validate_token(&self, token: &str) -> Result<TokenCheck> {
        let url = format!("{}/api/auth/validate", self.base_url);
        let request = self.client.post(&url).json(&TokenBody { token: Some(token) });

        self.send(request).await
    }

    /// Log an outbound call
    pub async fn dial(&self, to: &str, from: &str) -> Result<CallRecord> {
        let url = format!("{}/api/calls/dial", self.base_url);
        self.call(self.client.post(&url).json(&DialRequest { to, from }))
            .await
    }

    pub async fn call_status(&self, id: &str) -> Result<CallRecord> {
        let url = format!(
            "{}/api/calls/status/{}",
            self.base_url,
            urlencoding::encode(id)
        );
        self.call(self.client.get(&url)).await
    }

    pub async fn end_call(&self, id: &str) -> Result<CallRecord> {
        let url = format!("{}/api/calls/end/{}", self.base_url, urlencoding::encode(id));
        self.call(self.client.post(&url)).await
    }

    /// Finished calls, most recent first
    pub async fn history(&self, limit: Option<usize>, direction: Option<&str>) -> Result<CallHistory> {
        let url = format!("{}/api/calls/history", self.base_url);

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(direction) = direction {
            query.push(("direction", direction.to_string()));
        }

        self.send(self.client.get(&url).query(&query)).await
    }

    pub async fn active(&self) -> Result<ActiveCalls> {
        let url = format!("{}/api/calls/active", self.base_url);
        self.send(self.client.get(&url)).await
    }
}
