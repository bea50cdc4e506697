//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod call_direction;
mod call_status;
pub mod phone_number;

pub use call_direction::*;
pub use call_status::*;
