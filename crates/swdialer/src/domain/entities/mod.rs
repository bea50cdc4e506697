//! Domain Entities
//!
//! - CallRecord: One inbound or outbound phone call
//! - TokenGrant: Ephemeral subscriber credential minted by the platform

mod call_record;
mod token_grant;

pub use call_record::*;
pub use token_grant::*;
