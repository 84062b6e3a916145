//! `shopledger-inventory` — derived stock read model.
//!
//! Everything here is recomputed from the stock ledger on read: a read after
//! a commit on the same product always observes that commit, and the view
//! can never diverge from the ledger-sum invariant.

pub mod view;

pub use view::{
    status_bucket, InventoryConfig, InventoryItem, InventorySummary, InventoryView, StockStatus,
};
