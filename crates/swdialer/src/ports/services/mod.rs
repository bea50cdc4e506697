//! Service Ports
//!
//! Abstract interfaces for external services.

mod platform_client;

pub use platform_client::*;
