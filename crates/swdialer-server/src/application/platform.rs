//! Lazily constructed platform client
//!
//! Built on first use and shared by the token and call services. Concurrent
//! first callers wait on a single construction. A failed construction is not
//! cached, so the next caller tries again. Only the first failure is logged
//! as an error; retries log at debug.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::OnceCell;

use swdialer::{DomainError, PlatformClient};

type PlatformFactory =
    Box<dyn Fn() -> Result<Arc<dyn PlatformClient>, DomainError> + Send + Sync>;

pub struct PlatformProvider {
    client: OnceCell<Arc<dyn PlatformClient>>,
    factory: PlatformFactory,
    failure_reported: AtomicBool,
}

impl PlatformProvider {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn PlatformClient>, DomainError> + Send + Sync + 'static,
    {
        Self {
            client: OnceCell::new(),
            factory: Box::new(factory),
            failure_reported: AtomicBool::new(false),
        }
    }

    /// Provider around an already constructed client
    pub fn ready(client: Arc<dyn PlatformClient>) -> Self {
        let shared = Arc::clone(&client);
        Self {
            client: OnceCell::from(client),
            factory: Box::new(move || Ok(Arc::clone(&shared))),
            failure_reported: AtomicBool::new(false),
        }
    }

    pub async fn get(&self) -> Result<Arc<dyn PlatformClient>, DomainError> {
        self.client
            .get_or_try_init(|| async {
                match (self.factory)() {
                    Ok(client) => {
                        tracing::info!("🔌 SignalWire client initialized");
                        Ok(client)
                    }
                    Err(e) => {
                        if self.first_failure() {
                            tracing::error!("Failed to initialize SignalWire client: {}", e);
                        } else {
                            tracing::debug!("SignalWire client still unavailable: {}", e);
                        }
                        Err(e)
                    }
                }
            })
            .await
            .cloned()
    }

    /// True only for the first failed construction
    fn first_failure(&self) -> bool {
        !self.failure_reported.swap(true, Ordering::Relaxed)
    }

    /// Whether a client has been built, without triggering construction
    pub fn is_ready(&self) -> bool {
        self.client.initialized()
    }
}
