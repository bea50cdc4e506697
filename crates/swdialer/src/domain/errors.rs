//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// Platform credentials are missing. Permanent until reconfigured.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// The remote platform was unreachable or answered with a non-2xx status.
    #[error("Upstream error{}: {body}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Upstream { status: Option<u16>, body: String },
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn upstream(status: Option<u16>, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }
}
