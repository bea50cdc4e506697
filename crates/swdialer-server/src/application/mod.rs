//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! the call registry and the remote platform.

mod call_service;
mod platform;
mod token_service;

pub use call_service::CallService;
pub use platform::PlatformProvider;
pub use token_service::TokenService;
