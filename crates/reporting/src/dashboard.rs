//! Dashboard aggregates over the whole ledger.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use shopledger_core::DomainResult;
use shopledger_inventory::{InventoryView, StockStatus};
use shopledger_ledger::{LedgerEngine, OrderFilter, PaymentStatus};
use shopledger_parties::PartyStore;

/// Headline numbers for the landing screen, recomputed per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Sum of all sales order totals, in smallest currency unit.
    pub total_revenue: u64,
    /// Sum of all purchase order totals, in smallest currency unit.
    pub total_expenses: u64,
    /// Revenue minus expenses; negative while stocking up.
    pub total_profit: i64,
    pub total_orders: usize,
    /// Sales orders not yet paid.
    pub pending_orders: usize,
    /// Products below the low-stock threshold, empty shelves included.
    pub low_stock_products: usize,
    pub total_customers: usize,
    pub total_suppliers: usize,
}

/// Computes dashboard stats from the ledger, parties and inventory view.
#[derive(Debug)]
pub struct Dashboard {
    engine: Arc<LedgerEngine>,
    parties: Arc<PartyStore>,
    view: Arc<InventoryView>,
}

impl Dashboard {
    pub fn new(
        engine: Arc<LedgerEngine>,
        parties: Arc<PartyStore>,
        view: Arc<InventoryView>,
    ) -> Self {
        Self {
            engine,
            parties,
            view,
        }
    }

    pub fn stats(&self) -> DomainResult<DashboardStats> {
        let sales: Vec<_> = self.engine.list_sales_orders(&OrderFilter::default()).collect();
        let purchases: Vec<_> = self
            .engine
            .list_purchase_orders(&OrderFilter::default())
            .collect();

        let total_revenue: u64 = sales.iter().map(|o| o.total_amount).sum();
        let total_expenses: u64 = purchases.iter().map(|o| o.total_amount).sum();
        let pending_orders = sales
            .iter()
            .filter(|o| o.payment_status != PaymentStatus::Paid)
            .count();

        let low_stock_products = self
            .view
            .snapshot()?
            .into_iter()
            .filter(|r| r.status != StockStatus::InStock)
            .count();

        Ok(DashboardStats {
            total_revenue,
            total_expenses,
            total_profit: total_revenue as i64 - total_expenses as i64,
            total_orders: sales.len(),
            pending_orders,
            low_stock_products,
            total_customers: self.parties.list_customers().len(),
            total_suppliers: self.parties.list_suppliers().len(),
        })
    }
}
