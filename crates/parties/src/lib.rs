//! `shopledger-parties` — customers and suppliers.
//!
//! Parties have no lifecycle coupling to orders beyond being referenced;
//! orders validate the reference at commit time and never mutate the party.

pub mod party;
pub mod store;

pub use party::{ContactInfo, Customer, Supplier};
pub use store::PartyStore;
