//! Ledger engine: validates and commits orders, applies stock deltas.
//!
//! All write operations take an explicit `&Caller`; there is no ambient
//! request identity. Validation runs in full before any mutation (fail
//! closed). Commits hold a single engine-wide mutex across the stock
//! sufficiency check and the ledger append, so two concurrent sales orders
//! can never both pass validation against stock that only covers one of
//! them. Reads never take the commit lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};

use shopledger_auth::{require_role, Caller, Role};
use shopledger_catalog::CatalogStore;
use shopledger_core::{
    CustomerId, DomainError, DomainResult, OrderId, ProductId, RefKind, SupplierId,
};
use shopledger_parties::PartyStore;

use crate::order::{
    total_amount, validate_lines, LineInput, OrderFilter, OrderType, PaymentStatus, PurchaseOrder,
    SalesOrder,
};
use crate::stock::{StockDelta, StockLedger, StockLedgerEntry};

/// Engine policy knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Minimum role allowed to flip an order's payment status.
    pub payment_update_role: Role,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            payment_update_role: Role::Employee,
        }
    }
}

#[derive(Debug, Default)]
struct OrderBook {
    purchases: HashMap<OrderId, PurchaseOrder>,
    sales: HashMap<OrderId, SalesOrder>,
}

/// The order-entry and stock-mutation core.
#[derive(Debug)]
pub struct LedgerEngine {
    catalog: Arc<CatalogStore>,
    parties: Arc<PartyStore>,
    stock: StockLedger,
    orders: RwLock<OrderBook>,
    commit_lock: Mutex<()>,
    config: LedgerConfig,
}

impl LedgerEngine {
    pub fn new(catalog: Arc<CatalogStore>, parties: Arc<PartyStore>) -> Self {
        Self::with_config(catalog, parties, LedgerConfig::default())
    }

    pub fn with_config(
        catalog: Arc<CatalogStore>,
        parties: Arc<PartyStore>,
        config: LedgerConfig,
    ) -> Self {
        Self {
            catalog,
            parties,
            stock: StockLedger::new(),
            orders: RwLock::new(OrderBook::default()),
            commit_lock: Mutex::new(()),
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ── Commits ─────────────────────────────────────────────────────────

    /// Commit a purchase order: stores the order (unpaid) and appends one
    /// +quantity stock entry per line, all-or-nothing.
    pub fn commit_purchase_order(
        &self,
        caller: &Caller,
        supplier_id: SupplierId,
        date: DateTime<Utc>,
        lines: &[LineInput],
    ) -> DomainResult<PurchaseOrder> {
        require_role(caller, Role::Manager)?;
        let lines = validate_lines(lines)?;

        if self.parties.supplier(supplier_id).is_none() {
            return Err(DomainError::invalid_reference(RefKind::Supplier, supplier_id));
        }
        for line in &lines {
            if self.catalog.product(line.product_id).is_none() {
                return Err(DomainError::invalid_reference(
                    RefKind::Product,
                    line.product_id,
                ));
            }
        }

        let _guard = self.lock_commits()?;

        let order = PurchaseOrder {
            id: OrderId::new(),
            supplier_id,
            date,
            total_amount: total_amount(&lines),
            lines,
            payment_status: PaymentStatus::Unpaid,
            created_by: caller.user_id,
            created_at: Utc::now(),
        };

        let deltas: Vec<StockDelta> = order
            .lines
            .iter()
            .map(|l| StockDelta {
                product_id: l.product_id,
                delta: l.quantity,
            })
            .collect();
        self.stock.append_batch(order.id, order.created_at, &deltas)?;

        let mut book = self.write_orders()?;
        book.purchases.insert(order.id, order.clone());

        tracing::info!(
            order_id = %order.id,
            supplier_id = %supplier_id,
            total_amount = order.total_amount,
            lines = order.lines.len(),
            "purchase order committed"
        );
        Ok(order)
    }

    /// Commit a sales order: checks per-product stock sufficiency under the
    /// commit lock, then stores the order and appends −quantity entries.
    pub fn commit_sales_order(
        &self,
        caller: &Caller,
        customer_id: Option<CustomerId>,
        date: DateTime<Utc>,
        order_type: OrderType,
        lines: &[LineInput],
    ) -> DomainResult<SalesOrder> {
        require_role(caller, Role::Employee)?;
        let lines = validate_lines(lines)?;

        if let Some(customer_id) = customer_id {
            if self.parties.customer(customer_id).is_none() {
                return Err(DomainError::invalid_reference(RefKind::Customer, customer_id));
            }
        }
        for line in &lines {
            let product = self
                .catalog
                .product(line.product_id)
                .ok_or_else(|| DomainError::invalid_reference(RefKind::Product, line.product_id))?;
            if !product.can_be_sold() {
                return Err(DomainError::ProductInactive {
                    product_id: line.product_id,
                });
            }
        }

        let _guard = self.lock_commits()?;

        // Sufficiency check per product, duplicate lines summed. Runs under
        // the commit lock together with the append below, so two racing
        // sales orders serialize here.
        let mut requested: HashMap<ProductId, i64> = HashMap::new();
        for line in &lines {
            *requested.entry(line.product_id).or_insert(0) += line.quantity;
        }
        for (product_id, quantity) in &requested {
            let available = self.stock.balance(*product_id)?;
            if available < *quantity {
                tracing::warn!(
                    product_id = %product_id,
                    requested = quantity,
                    available,
                    "sales order rejected: insufficient stock"
                );
                return Err(DomainError::InsufficientStock {
                    product_id: *product_id,
                    requested: *quantity,
                    available,
                });
            }
        }

        let order = SalesOrder {
            id: OrderId::new(),
            customer_id,
            date,
            order_type,
            total_amount: total_amount(&lines),
            lines,
            payment_status: PaymentStatus::Unpaid,
            created_by: caller.user_id,
            created_at: Utc::now(),
        };

        let deltas: Vec<StockDelta> = order
            .lines
            .iter()
            .map(|l| StockDelta {
                product_id: l.product_id,
                delta: -l.quantity,
            })
            .collect();
        self.stock.append_batch(order.id, order.created_at, &deltas)?;

        let mut book = self.write_orders()?;
        book.sales.insert(order.id, order.clone());

        tracing::info!(
            order_id = %order.id,
            order_type = %order.order_type,
            total_amount = order.total_amount,
            lines = order.lines.len(),
            "sales order committed"
        );
        Ok(order)
    }

    // ── Payment status ──────────────────────────────────────────────────

    /// Flip an order's payment status. Idempotent; `NotFound` for unknown
    /// ids. The required role is a config policy, not a hardcoded rule.
    pub fn set_payment_status(
        &self,
        caller: &Caller,
        order_id: OrderId,
        status: PaymentStatus,
    ) -> DomainResult<()> {
        require_role(caller, self.config.payment_update_role)?;

        let mut book = self.write_orders()?;
        if let Some(order) = book.purchases.get_mut(&order_id) {
            order.payment_status = status;
            return Ok(());
        }
        if let Some(order) = book.sales.get_mut(&order_id) {
            order.payment_status = status;
            return Ok(());
        }
        Err(DomainError::NotFound)
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn get_purchase_order(&self, order_id: OrderId) -> Option<PurchaseOrder> {
        self.orders.read().ok()?.purchases.get(&order_id).cloned()
    }

    pub fn get_sales_order(&self, order_id: OrderId) -> Option<SalesOrder> {
        self.orders.read().ok()?.sales.get(&order_id).cloned()
    }

    /// Purchase orders matching `filter`, date descending, id descending.
    ///
    /// The iterator runs over a snapshot; calling again restarts against the
    /// then-current order book.
    pub fn list_purchase_orders(
        &self,
        filter: &OrderFilter,
    ) -> std::vec::IntoIter<PurchaseOrder> {
        let book = match self.orders.read() {
            Ok(guard) => guard,
            Err(_) => return Vec::new().into_iter(),
        };
        let mut orders: Vec<PurchaseOrder> = book
            .purchases
            .values()
            .filter(|o| filter.matches(o.date, o.payment_status))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        orders.into_iter()
    }

    /// Sales orders matching `filter`, date descending, id descending.
    pub fn list_sales_orders(&self, filter: &OrderFilter) -> std::vec::IntoIter<SalesOrder> {
        let book = match self.orders.read() {
            Ok(guard) => guard,
            Err(_) => return Vec::new().into_iter(),
        };
        let mut orders: Vec<SalesOrder> = book
            .sales
            .values()
            .filter(|o| filter.matches(o.date, o.payment_status))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        orders.into_iter()
    }

    /// Current stock of a product: the running sum of its ledger entries.
    pub fn current_stock(&self, product_id: ProductId) -> DomainResult<i64> {
        self.stock.balance(product_id)
    }

    pub fn stock_last_updated(&self, product_id: ProductId) -> DomainResult<Option<DateTime<Utc>>> {
        self.stock.last_updated(product_id)
    }

    /// Audit trail: full movement history for one product.
    pub fn stock_entries(&self, product_id: ProductId) -> DomainResult<Vec<StockLedgerEntry>> {
        self.stock.entries(product_id)
    }

    fn lock_commits(&self) -> DomainResult<std::sync::MutexGuard<'_, ()>> {
        self.commit_lock
            .lock()
            .map_err(|_| DomainError::conflict("commit lock poisoned"))
    }

    fn write_orders(&self) -> DomainResult<std::sync::RwLockWriteGuard<'_, OrderBook>> {
        self.orders
            .write()
            .map_err(|_| DomainError::conflict("order book lock poisoned"))
    }
}
