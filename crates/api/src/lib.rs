//! `shopledger-api` — HTTP surface over the order & inventory ledger.

pub mod app;
pub mod context;
pub mod middleware;
pub mod tokens;

pub use app::services::AppConfig;
