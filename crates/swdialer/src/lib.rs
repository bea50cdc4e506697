//! SWDialer Domain Library
//!
//! Core domain types and interfaces for the SWDialer backend, a thin facade
//! that issues short-lived subscriber tokens for the remote communications
//! platform and tracks the lifecycle of calls placed through the web dialer.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (CallRecord, TokenGrant)
//!   - `value_objects/`: Immutable value types (CallDirection, CallStatus, phone numbers)
//!   - `services/`: The in-process CallRegistry
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `services/`: The remote platform client
//!
//! # Usage
//!
//! ```rust,ignore
//! use swdialer::{CallRegistry, CallDirection, PlatformClient};
//!
//! let registry = CallRegistry::new();
//! let call = registry.start_outbound("555-123-4567", "WebDialer", Some(&client))?;
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    phone_number, CallDirection, CallRecord, CallRegistry, CallStatus, DomainError,
    HistoryPage, InboundRegistration, TokenGrant, DEFAULT_CALLER, DEFAULT_HISTORY_LIMIT,
    DEFAULT_INBOUND_FROM, HISTORY_CAPACITY,
};
pub use ports::{
    PlatformClient, TokenRequest, DEFAULT_REFERENCE, DEFAULT_TOKEN_TTL_SECS,
};
