//! CallStatus - Lifecycle stage of a call

use serde::{Deserialize, Serialize};

/// Call lifecycle status
///
/// Outbound calls start `Initiated`, inbound calls start `Ringing`.
/// Both finish as `Ended`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Initiated,
    Ringing,
    Ended,
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallStatus::Initiated => write!(f, "initiated"),
            CallStatus::Ringing => write!(f, "ringing"),
            CallStatus::Ended => write!(f, "ended"),
        }
    }
}
