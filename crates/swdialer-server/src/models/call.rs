//! Call - Call tracking DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use swdialer::{CallDirection, CallRecord, HistoryPage, DEFAULT_HISTORY_LIMIT};

// ============================================
// Request DTOs
// ============================================

/// Dial request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DialRequest {
    /// Number to call
    pub to: Option<String>,
    /// Caller label (defaults to "WebDialer")
    pub from: Option<String>,
}

/// Incoming call webhook from SignalWire (JSON or form encoded)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct IncomingCallWebhook {
    #[serde(rename = "From")]
    pub from: Option<String>,
    #[serde(rename = "To")]
    pub to: Option<String>,
    #[serde(rename = "CallSid")]
    pub call_sid: Option<String>,
}

/// Call history query
///
/// Both parameters are read leniently: a `limit` that is not a non-negative
/// integer falls back to the default.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Maximum records returned (default 50)
    pub limit: Option<String>,
    /// "inbound" or "outbound"; all when omitted, none when unrecognised
    pub direction: Option<String>,
}

impl HistoryQuery {
    pub fn limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    /// Requested direction filter; `Err` carries a value no call can match
    pub fn direction(&self) -> Result<Option<CallDirection>, String> {
        match self.direction.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| raw.to_string()),
        }
    }
}

// ============================================
// Response DTOs
// ============================================

/// Call record
#[derive(Debug, Serialize, ToSchema)]
pub struct CallRecordResponse {
    pub id: String,
    pub to: String,
    pub from: String,
    pub direction: String,
    pub status: String,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    pub duration: u64,
}

impl From<CallRecord> for CallRecordResponse {
    fn from(call: CallRecord) -> Self {
        Self {
            id: call.id,
            to: call.to,
            from: call.from,
            direction: call.direction.to_string(),
            status: call.status.to_string(),
            started_at: call.started_at,
            ended_at: call.ended_at,
            duration: call.duration,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CallResponse {
    pub success: bool,
    pub data: CallRecordResponse,
}

impl From<CallRecord> for CallResponse {
    fn from(call: CallRecord) -> Self {
        Self {
            success: true,
            data: call.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IncomingCallResponse {
    pub success: bool,
    pub message: String,
    pub call_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CallHistoryResponse {
    pub success: bool,
    pub data: Vec<CallRecordResponse>,
    /// Matching calls before the limit was applied
    pub total: usize,
}

impl From<HistoryPage> for CallHistoryResponse {
    fn from(page: HistoryPage) -> Self {
        Self {
            success: true,
            data: page.calls.into_iter().map(Into::into).collect(),
            total: page.total,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActiveCallsResponse {
    pub success: bool,
    pub data: Vec<CallRecordResponse>,
    pub count: usize,
}

impl From<Vec<CallRecord>> for ActiveCallsResponse {
    fn from(calls: Vec<CallRecord>) -> Self {
        Self {
            success: true,
            count: calls.len(),
            data: calls.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<&str>, direction: Option<&str>) -> HistoryQuery {
        HistoryQuery {
            limit: limit.map(str::to_string),
            direction: direction.map(str::to_string),
        }
    }

    #[test]
    fn test_history_limit_is_lenient() {
        assert_eq!(query(None, None).limit(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(query(Some("7"), None).limit(), 7);
        assert_eq!(query(Some(" 3 "), None).limit(), 3);
        assert_eq!(query(Some("0"), None).limit(), 0);
        assert_eq!(query(Some("abc"), None).limit(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(query(Some("-1"), None).limit(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(query(Some(""), None).limit(), DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn test_history_direction() {
        assert_eq!(query(None, None).direction(), Ok(None));
        assert_eq!(query(None, Some("")).direction(), Ok(None));
        assert_eq!(
            query(None, Some("inbound")).direction(),
            Ok(Some(CallDirection::Inbound))
        );
        assert_eq!(
            query(None, Some("sideways")).direction(),
            Err("sideways".to_string())
        );
    }
}
