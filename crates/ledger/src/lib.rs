//! `shopledger-ledger` — the order-entry and stock-mutation core.
//!
//! Purchase orders increase stock, sales orders decrease it, and every
//! movement lands in an append-only per-product ledger that the inventory
//! view derives from. Commits are validated in full before any mutation is
//! applied (all-or-nothing).

pub mod engine;
pub mod order;
pub mod stock;

pub use engine::{LedgerConfig, LedgerEngine};
pub use order::{
    LineInput, OrderFilter, OrderLine, OrderType, PaymentStatus, PurchaseOrder, SalesOrder,
};
pub use stock::{StockDelta, StockLedger, StockLedgerEntry};
