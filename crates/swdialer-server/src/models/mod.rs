//! SWDialer API Models
//!
//! - Auth: Subscriber token requests and responses
//! - Call: Call tracking requests and responses
//! - Status: Service info, health and error bodies

mod auth;
mod call;
mod status;

pub use auth::*;
pub use call::*;
pub use status::*;
