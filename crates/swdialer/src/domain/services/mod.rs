//! Domain Services
//!
//! Stateful domain logic that does not belong to a single entity.

mod call_registry;

pub use call_registry::*;
