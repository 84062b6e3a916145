//! `shopledger-auth` — caller identity, roles and pure role checks.
//!
//! This crate is intentionally decoupled from HTTP and storage. Token
//! decoding/verification is the transport layer's job; what arrives here is
//! an already-resolved caller identity plus a role.

pub mod authorize;
pub mod caller;
pub mod role;
pub mod user;

pub use authorize::require_role;
pub use caller::Caller;
pub use role::Role;
pub use user::{User, UserDirectory};
