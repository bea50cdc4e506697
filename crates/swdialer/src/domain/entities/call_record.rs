//! CallRecord - One phone call, inbound or outbound
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{CallDirection, CallStatus};

/// Caller label used for outbound calls when the dialer does not send one
pub const DEFAULT_CALLER: &str = "WebDialer";

/// Caller label used for inbound webhooks without a `From` field
pub const DEFAULT_INBOUND_FROM: &str = "Unknown";

/// CallRecord - Record of a single call
///
/// `ended_at` stays `None` and `duration` stays `0` until [`CallRecord::finish`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallRecord {
    pub id: String,
    pub to: String,
    pub from: String,
    pub direction: CallDirection,
    pub status: CallStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    pub duration: u64,
}

impl CallRecord {
    /// Create an outbound call with a fresh id
    pub fn outbound(to: String, from: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            to,
            from,
            direction: CallDirection::Outbound,
            status: CallStatus::Initiated,
            started_at: Utc::now(),
            ended_at: None,
            duration: 0,
        }
    }

    /// Create an inbound call, keeping the platform's id when it sent one
    pub fn inbound(remote_id: Option<String>, from: String, to: String) -> Self {
        let id = remote_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            id,
            to,
            from,
            direction: CallDirection::Inbound,
            status: CallStatus::Ringing,
            started_at: Utc::now(),
            ended_at: None,
            duration: 0,
        }
    }

    /// Mark the call ended at `now`
    ///
    /// Duration is floored to whole seconds and clamped at zero if the clock
    /// went backwards.
    pub fn finish(&mut self, now: DateTime<Utc>) {
        self.status = CallStatus::Ended;
        self.ended_at = Some(now);
        self.duration = (now - self.started_at).num_seconds().max(0) as u64;
    }
}
