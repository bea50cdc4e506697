//! Call Application Service (Use Case)
//!
//! Resolves the platform client before touching the registry so the
//! registry lock is never held across a client lookup.

use std::sync::Arc;

use swdialer::{
    CallDirection, CallRecord, CallRegistry, DomainError, HistoryPage, InboundRegistration,
    DEFAULT_CALLER,
};

use super::PlatformProvider;

/// Application service for call tracking
pub struct CallService {
    registry: CallRegistry,
    platform: Arc<PlatformProvider>,
}

impl CallService {
    pub fn new(platform: Arc<PlatformProvider>) -> Self {
        Self {
            registry: CallRegistry::new(),
            platform,
        }
    }

    /// Log an outbound call placed by the dialer
    pub async fn start_outbound(
        &self,
        to: Option<String>,
        from: Option<String>,
    ) -> Result<CallRecord, DomainError> {
        let to = to.unwrap_or_default();
        if to.trim().is_empty() {
            return Err(DomainError::Validation(
                "Phone number is required".to_string(),
            ));
        }

        let client = match self.platform.get().await {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!("Number validation skipped, platform unavailable: {}", e);
                None
            }
        };

        let from = from.filter(|f| !f.is_empty());
        self.registry.start_outbound(
            &to,
            from.as_deref().unwrap_or(DEFAULT_CALLER),
            client.as_deref(),
        )
    }

    pub fn register_inbound(
        &self,
        call_sid: Option<String>,
        from: Option<String>,
        to: Option<String>,
    ) -> InboundRegistration {
        self.registry.register_inbound(call_sid, from, to)
    }

    pub fn get(&self, id: &str) -> Result<CallRecord, DomainError> {
        self.registry.get(id)
    }

    pub fn end(&self, id: &str) -> Result<CallRecord, DomainError> {
        self.registry.end(id)
    }

    pub fn history(&self, direction: Option<CallDirection>, limit: usize) -> HistoryPage {
        self.registry.list_history(direction, limit)
    }

    pub fn active(&self) -> Vec<CallRecord> {
        self.registry.list_active()
    }
}
