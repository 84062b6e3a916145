//! Append-only stock ledger.
//!
//! One stream of signed quantity deltas per product, each entry tagged with
//! the originating order id. The running sum of a stream is that product's
//! current stock; this log is the source of truth for the inventory view.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopledger_core::{DomainError, DomainResult, EntryId, OrderId, ProductId};

/// A committed stock movement (assigned a per-product sequence number).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLedgerEntry {
    pub entry_id: EntryId,
    pub product_id: ProductId,
    /// Monotonically increasing position in the product's stream, starting at 1.
    pub sequence: u64,
    /// Signed quantity change: +qty from a purchase, −qty from a sale.
    pub delta: i64,
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// A stock movement ready to be appended (not yet assigned a sequence number).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockDelta {
    pub product_id: ProductId,
    pub delta: i64,
}

/// In-memory append-only stock ledger.
///
/// Batch appends are atomic: the whole batch is checked against the
/// resulting balances before any entry is inserted, so a rejected batch
/// leaves every stream untouched.
#[derive(Debug, Default)]
pub struct StockLedger {
    streams: RwLock<HashMap<ProductId, Vec<StockLedgerEntry>>>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn stream_balance(stream: &[StockLedgerEntry]) -> i64 {
        stream.iter().map(|e| e.delta).sum()
    }

    /// Current stock of a product: Σ deltas. Zero for unknown products.
    pub fn balance(&self, product_id: ProductId) -> DomainResult<i64> {
        let streams = self.read()?;
        Ok(streams
            .get(&product_id)
            .map(|s| Self::stream_balance(s))
            .unwrap_or(0))
    }

    /// Timestamp of the most recent movement, if any.
    pub fn last_updated(&self, product_id: ProductId) -> DomainResult<Option<DateTime<Utc>>> {
        let streams = self.read()?;
        Ok(streams
            .get(&product_id)
            .and_then(|s| s.last())
            .map(|e| e.occurred_at))
    }

    /// Full movement history for a product, in sequence order.
    pub fn entries(&self, product_id: ProductId) -> DomainResult<Vec<StockLedgerEntry>> {
        let streams = self.read()?;
        Ok(streams.get(&product_id).cloned().unwrap_or_default())
    }

    /// Append one order's deltas atomically.
    ///
    /// Deltas for the same product are summed before the balance check, so
    /// a batch can never drive any stream negative, not even transiently.
    /// The engine validates sufficiency first; this check also runs here so
    /// no caller of the ledger can bypass the invariant.
    pub fn append_batch(
        &self,
        order_id: OrderId,
        occurred_at: DateTime<Utc>,
        deltas: &[StockDelta],
    ) -> DomainResult<Vec<StockLedgerEntry>> {
        if deltas.is_empty() {
            return Ok(Vec::new());
        }

        let mut streams = self
            .streams
            .write()
            .map_err(|_| DomainError::conflict("stock ledger lock poisoned"))?;

        // First pass: net effect per product against current balances.
        let mut net: HashMap<ProductId, i64> = HashMap::new();
        for d in deltas {
            *net.entry(d.product_id).or_insert(0) += d.delta;
        }
        for (product_id, delta) in &net {
            let available = streams
                .get(product_id)
                .map(|s| Self::stream_balance(s))
                .unwrap_or(0);
            let resulting = available + delta;
            if resulting < 0 {
                return Err(DomainError::InsufficientStock {
                    product_id: *product_id,
                    requested: -delta,
                    available,
                });
            }
        }

        // Second pass: assign sequence numbers and append.
        let mut committed = Vec::with_capacity(deltas.len());
        for d in deltas {
            let stream = streams.entry(d.product_id).or_default();
            let sequence = stream.last().map(|e| e.sequence).unwrap_or(0) + 1;
            let entry = StockLedgerEntry {
                entry_id: EntryId::new(),
                product_id: d.product_id,
                sequence,
                delta: d.delta,
                order_id,
                occurred_at,
            };
            stream.push(entry.clone());
            committed.push(entry);
        }

        Ok(committed)
    }

    /// Products that have at least one ledger entry.
    pub fn product_ids(&self) -> DomainResult<Vec<ProductId>> {
        let streams = self.read()?;
        let mut ids: Vec<ProductId> = streams.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    fn read(
        &self,
    ) -> DomainResult<std::sync::RwLockReadGuard<'_, HashMap<ProductId, Vec<StockLedgerEntry>>>>
    {
        self.streams
            .read()
            .map_err(|_| DomainError::conflict("stock ledger lock poisoned"))
    }
}
