//! Call Registry - In-process store of call records
//!
//! Owns every CallRecord and all of its transitions. Records live in exactly
//! one of two places: the active map (keyed by id) or the bounded history
//! (insertion ordered, oldest evicted first).
//!
//! A single `RwLock` guards both containers together. Mutations take it
//! exclusively, reads take it shared and clone out a snapshot. Nothing that
//! can block on I/O runs while it is held.

use std::collections::{HashMap, VecDeque};

use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::{
    CallDirection, CallRecord, DomainError, DEFAULT_CALLER, DEFAULT_INBOUND_FROM,
};
use crate::ports::PlatformClient;

/// Maximum number of finished calls kept in history
pub const HISTORY_CAPACITY: usize = 100;

/// Default page size for [`CallRegistry::list_history`]
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Result of registering an inbound call
#[derive(Debug, Clone)]
pub struct InboundRegistration {
    pub record: CallRecord,
    /// The id was already known (webhook redelivery); nothing was inserted
    pub duplicate: bool,
}

/// One page of call history
#[derive(Debug, Clone)]
pub struct HistoryPage {
    pub calls: Vec<CallRecord>,
    /// Matching records before the limit was applied
    pub total: usize,
}

#[derive(Default)]
struct RegistryInner {
    active: HashMap<String, CallRecord>,
    history: VecDeque<CallRecord>,
}

impl RegistryInner {
    fn find_in_history(&self, id: &str) -> Option<&CallRecord> {
        self.history.iter().rev().find(|call| call.id == id)
    }

    fn push_history(&mut self, record: CallRecord) {
        self.history.push_back(record);
        while self.history.len() > HISTORY_CAPACITY {
            if let Some(evicted) = self.history.pop_front() {
                tracing::debug!("Evicted call {} from history", evicted.id);
            }
        }
    }
}

/// In-process registry of active and finished calls
#[derive(Default)]
pub struct CallRegistry {
    inner: RwLock<RegistryInner>,
}

impl CallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an outbound call
    ///
    /// With a platform client the number is validated and normalized first.
    /// Without one the number is stored as given (degraded mode).
    pub fn start_outbound(
        &self,
        to: &str,
        from: &str,
        platform: Option<&dyn PlatformClient>,
    ) -> Result<CallRecord, DomainError> {
        if to.trim().is_empty() {
            return Err(DomainError::Validation(
                "Phone number is required".to_string(),
            ));
        }

        let to = match platform {
            Some(client) => {
                if !client.validate_number(to) {
                    return Err(DomainError::Validation(
                        "Invalid phone number format".to_string(),
                    ));
                }
                client.format_number(to)
            }
            None => to.to_string(),
        };

        let record = CallRecord::outbound(to, from.to_string());

        self.inner
            .write()
            .active
            .insert(record.id.clone(), record.clone());

        tracing::info!("Outbound call initiated: {} to {}", record.id, record.to);

        Ok(record)
    }

    /// Register a call announced by the platform's webhook
    ///
    /// A redelivered webhook for an id that is active or already finished is
    /// a no-op: the stored record is returned and flagged as a duplicate.
    pub fn register_inbound(
        &self,
        remote_id: Option<String>,
        from: Option<String>,
        to: Option<String>,
    ) -> InboundRegistration {
        let record = CallRecord::inbound(
            remote_id,
            from.unwrap_or_else(|| DEFAULT_INBOUND_FROM.to_string()),
            to.unwrap_or_else(|| DEFAULT_CALLER.to_string()),
        );

        let mut inner = self.inner.write();

        let existing = inner
            .active
            .get(&record.id)
            .or_else(|| inner.find_in_history(&record.id))
            .cloned();

        if let Some(existing) = existing {
            drop(inner);
            tracing::warn!("Duplicate incoming call webhook ignored: {}", existing.id);
            return InboundRegistration {
                record: existing,
                duplicate: true,
            };
        }

        inner.active.insert(record.id.clone(), record.clone());
        drop(inner);

        tracing::info!("Incoming call received: {} from {}", record.id, record.from);

        InboundRegistration {
            record,
            duplicate: false,
        }
    }

    /// Look up a call, active calls first
    pub fn get(&self, id: &str) -> Result<CallRecord, DomainError> {
        let inner = self.inner.read();
        inner
            .active
            .get(id)
            .or_else(|| inner.find_in_history(id))
            .cloned()
            .ok_or_else(|| DomainError::not_found("Call", id))
    }

    /// End an active call and move it into history
    pub fn end(&self, id: &str) -> Result<CallRecord, DomainError> {
        let mut inner = self.inner.write();

        let mut record = inner
            .active
            .remove(id)
            .ok_or_else(|| DomainError::not_found("Call", id))?;

        record.finish(Utc::now());
        inner.push_history(record.clone());
        drop(inner);

        tracing::info!("Call ended: {} ({}s)", record.id, record.duration);

        Ok(record)
    }

    /// Finished calls, most recent first
    ///
    /// Ties on `started_at` keep insertion order.
    pub fn list_history(&self, direction: Option<CallDirection>, limit: usize) -> HistoryPage {
        let mut calls: Vec<CallRecord> = {
            let inner = self.inner.read();
            inner
                .history
                .iter()
                .filter(|call| direction.map_or(true, |d| call.direction == d))
                .cloned()
                .collect()
        };

        let total = calls.len();
        calls.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        calls.truncate(limit);

        HistoryPage { calls, total }
    }

    /// Snapshot of calls in progress, in no particular order
    pub fn list_active(&self) -> Vec<CallRecord> {
        self.inner.read().active.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CallStatus;
    use crate::ports::TokenRequest;
    use crate::TokenGrant;
    use async_trait::async_trait;
    use std::collections::HashSet;

    struct StubPlatform;

    #[async_trait]
    impl PlatformClient for StubPlatform {
        async fn mint_token(&self, _request: TokenRequest) -> Result<TokenGrant, DomainError> {
            Err(DomainError::upstream(None, "not used"))
        }
    }

    fn assert_disjoint(registry: &CallRegistry) {
        let inner = registry.inner.read();
        for call in &inner.history {
            assert!(
                !inner.active.contains_key(&call.id),
                "call {} is both active and in history",
                call.id
            );
        }
    }

    #[test]
    fn test_dial_then_end_scenario() {
        let registry = CallRegistry::new();
        let call = registry
            .start_outbound("555-123-4567", DEFAULT_CALLER, Some(&StubPlatform))
            .unwrap();

        assert_eq!(call.to, "+15551234567");
        assert_eq!(call.status, CallStatus::Initiated);
        assert_eq!(call.duration, 0);
        assert_eq!(registry.list_active().len(), 1);

        let ended = registry.end(&call.id).unwrap();
        assert_eq!(ended.status, CallStatus::Ended);
        assert!(ended.ended_at.is_some());

        assert!(registry.list_active().is_empty());
        let page = registry.list_history(None, DEFAULT_HISTORY_LIMIT);
        assert_eq!(page.total, 1);
        assert_eq!(page.calls[0].id, call.id);
        assert_eq!(registry.get(&call.id).unwrap().status, CallStatus::Ended);
    }

    #[test]
    fn test_start_outbound_requires_number() {
        let registry = CallRegistry::new();
        let err = registry.start_outbound("", DEFAULT_CALLER, None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = registry.start_outbound("   ", DEFAULT_CALLER, Some(&StubPlatform)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(registry.list_active().is_empty());
    }

    #[test]
    fn test_start_outbound_rejects_invalid_number() {
        let registry = CallRegistry::new();
        let err = registry
            .start_outbound("12345", DEFAULT_CALLER, Some(&StubPlatform))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("Invalid")));
        assert!(registry.list_active().is_empty());
    }

    #[test]
    fn test_start_outbound_degraded_mode_keeps_number() {
        let registry = CallRegistry::new();
        let call = registry.start_outbound("12345", "Desk", None).unwrap();
        assert_eq!(call.to, "12345");
        assert_eq!(call.from, "Desk");
    }

    #[test]
    fn test_end_unknown_id_mutates_nothing() {
        let registry = CallRegistry::new();
        let active = registry.start_outbound("5551234567", DEFAULT_CALLER, None).unwrap();

        let err = registry.end("missing").unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(registry.list_active().len(), 1);
        assert_eq!(registry.list_history(None, 10).total, 0);

        registry.end(&active.id).unwrap();
        // Ending twice is also not found
        assert!(matches!(registry.end(&active.id), Err(DomainError::NotFound { .. })));
        assert_eq!(registry.list_history(None, 10).total, 1);
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let registry = CallRegistry::new();
        assert!(matches!(registry.get("nope"), Err(DomainError::NotFound { .. })));
    }

    #[test]
    fn test_active_and_history_stay_disjoint() {
        let registry = CallRegistry::new();
        let mut ids = Vec::new();

        for i in 0..20 {
            let call = registry
                .start_outbound(&format!("555000{:04}", i), DEFAULT_CALLER, None)
                .unwrap();
            ids.push(call.id);
            assert_disjoint(&registry);

            if i % 3 == 0 {
                registry.end(&ids[i]).unwrap();
                assert_disjoint(&registry);
            }
        }

        let active: HashSet<String> = registry.list_active().into_iter().map(|c| c.id).collect();
        let history = registry.list_history(None, HISTORY_CAPACITY);
        assert_eq!(active.len() + history.total, 20);
        for call in history.calls {
            assert!(!active.contains(&call.id));
        }
    }

    #[test]
    fn test_history_evicts_oldest_inserted() {
        let registry = CallRegistry::new();
        let mut ended = Vec::new();

        for i in 0..HISTORY_CAPACITY + 5 {
            let call = registry
                .start_outbound(&format!("555{:07}", i), DEFAULT_CALLER, None)
                .unwrap();
            registry.end(&call.id).unwrap();
            ended.push(call.id);

            let len = registry.inner.read().history.len();
            assert!(len <= HISTORY_CAPACITY);
        }

        let inner = registry.inner.read();
        assert_eq!(inner.history.len(), HISTORY_CAPACITY);
        assert_eq!(inner.history.front().unwrap().id, ended[5]);
        assert_eq!(inner.history.back().unwrap().id, ended[HISTORY_CAPACITY + 4]);
        drop(inner);

        for evicted in &ended[..5] {
            assert!(registry.get(evicted).is_err());
        }
    }

    #[test]
    fn test_list_history_filters_sorts_and_counts() {
        let registry = CallRegistry::new();

        for i in 0..4 {
            let call = registry.register_inbound(Some(format!("CA{}", i)), None, None);
            registry.end(&call.record.id).unwrap();
        }
        for i in 0..3 {
            let call = registry
                .start_outbound(&format!("555123456{}", i), DEFAULT_CALLER, None)
                .unwrap();
            registry.end(&call.id).unwrap();
        }

        let page = registry.list_history(Some(CallDirection::Inbound), 2);
        assert_eq!(page.total, 4);
        assert_eq!(page.calls.len(), 2);
        assert!(page
            .calls
            .iter()
            .all(|c| c.direction == CallDirection::Inbound));
        assert!(page.calls[0].started_at >= page.calls[1].started_at);

        let all = registry.list_history(None, DEFAULT_HISTORY_LIMIT);
        assert_eq!(all.total, 7);
        for pair in all.calls.windows(2) {
            assert!(pair[0].started_at >= pair[1].started_at);
        }

        let outbound = registry.list_history(Some(CallDirection::Outbound), 0);
        assert_eq!(outbound.total, 3);
        assert!(outbound.calls.is_empty());
    }

    #[test]
    fn test_list_history_ties_keep_insertion_order() {
        let registry = CallRegistry::new();
        let started_at = Utc::now();
        {
            let mut inner = registry.inner.write();
            for id in ["a", "b", "c"] {
                let mut call = CallRecord::inbound(Some(id.to_string()), "x".into(), "y".into());
                call.started_at = started_at;
                call.finish(started_at);
                inner.push_history(call);
            }
        }

        let ids: Vec<String> = registry
            .list_history(None, 10)
            .calls
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_register_inbound_defaults() {
        let registry = CallRegistry::new();
        let registration = registry.register_inbound(None, None, None);

        assert!(!registration.duplicate);
        assert_eq!(registration.record.from, DEFAULT_INBOUND_FROM);
        assert_eq!(registration.record.to, DEFAULT_CALLER);
        assert_eq!(registration.record.direction, CallDirection::Inbound);
        assert_eq!(registration.record.status, CallStatus::Ringing);
    }

    #[test]
    fn test_duplicate_webhook_yields_single_history_entry() {
        let registry = CallRegistry::new();

        let first = registry.register_inbound(Some("CA123".into()), Some("+15550001111".into()), None);
        let second = registry.register_inbound(Some("CA123".into()), Some("+15559999999".into()), None);
        assert!(!first.duplicate);
        assert!(second.duplicate);
        assert_eq!(second.record.from, "+15550001111");
        assert_eq!(registry.list_active().len(), 1);

        registry.end("CA123").unwrap();

        // Redelivery after the call finished must not resurrect it
        let third = registry.register_inbound(Some("CA123".into()), None, None);
        assert!(third.duplicate);
        assert_eq!(third.record.status, CallStatus::Ended);
        assert!(registry.list_active().is_empty());
        assert!(registry.end("CA123").is_err());

        let page = registry.list_history(None, DEFAULT_HISTORY_LIMIT);
        let count = page.calls.iter().filter(|c| c.id == "CA123").count();
        assert_eq!(count, 1);
        assert_disjoint(&registry);
    }

    #[test]
    fn test_concurrent_start_and_end() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(CallRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for i in 0..25 {
                        let call = registry
                            .start_outbound(&format!("55{:02}{:06}", t, i), DEFAULT_CALLER, None)
                            .unwrap();
                        let _ = registry.list_active();
                        registry.end(&call.id).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(registry.list_active().is_empty());
        assert_eq!(registry.inner.read().history.len(), HISTORY_CAPACITY);
        assert_disjoint(&registry);
    }
}
