//! TokenGrant - Subscriber token handed back to the dialer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ephemeral credential minted by the remote platform.
///
/// Nothing here is stored; validity is enforced by the platform alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenGrant {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    /// Requested validity window in seconds
    pub expires_in: u64,
    pub subscriber_id: Option<String>,
    pub reference: String,
    pub project_id: String,
    /// Platform space host (FQDN)
    pub space_name: String,
}
