//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod signalwire;

// Re-exports
pub use signalwire::{SignalWireClient, SignalWireConfig};
