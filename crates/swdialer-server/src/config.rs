//! Server configuration from the environment
//!
//! Platform credentials are read separately by the SignalWire adapter so a
//! missing credential only disables token issuance, not the whole server.

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen port (`PORT`)
    pub port: u16,
    /// Origin allowed by CORS (`FRONTEND_URL`)
    pub frontend_url: String,
    /// Verbose logging (`DEBUG`)
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            debug: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT").filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let frontend_url = lookup("FRONTEND_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string());

        let debug = lookup("DEBUG")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            port,
            frontend_url,
            debug,
        })
    }
}
