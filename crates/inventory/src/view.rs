//! Inventory view: current stock, status buckets, summary aggregation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopledger_catalog::CatalogStore;
use shopledger_core::{DomainError, DomainResult, ProductId};
use shopledger_ledger::LedgerEngine;

/// Inventory view options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Below this quantity (exclusive) a non-empty stock level counts as low.
    pub low_stock_threshold: i64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 10,
        }
    }
}

/// Coarse classification of a product's stock level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out_of_stock",
            StockStatus::LowStock => "low_stock",
            StockStatus::InStock => "in_stock",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket a quantity: 0 is out of stock, anything below the threshold is
/// low, the rest is in stock.
pub fn status_bucket(quantity: i64, config: &InventoryConfig) -> StockStatus {
    if quantity <= 0 {
        StockStatus::OutOfStock
    } else if quantity < config.low_stock_threshold {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

/// One row of the inventory snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub product_id: ProductId,
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub status: StockStatus,
    /// None until the product's first stock movement.
    pub last_updated: Option<DateTime<Utc>>,
}

/// Aggregate counts over the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_products: usize,
    pub total_units_in_stock: i64,
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
}

/// Read model over the ledger and catalog.
#[derive(Debug)]
pub struct InventoryView {
    engine: Arc<LedgerEngine>,
    catalog: Arc<CatalogStore>,
    config: InventoryConfig,
}

impl InventoryView {
    pub fn new(engine: Arc<LedgerEngine>, catalog: Arc<CatalogStore>) -> Self {
        Self::with_config(engine, catalog, InventoryConfig::default())
    }

    pub fn with_config(
        engine: Arc<LedgerEngine>,
        catalog: Arc<CatalogStore>,
        config: InventoryConfig,
    ) -> Self {
        Self {
            engine,
            catalog,
            config,
        }
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Current stock for one product (ledger sum).
    pub fn current_stock(&self, product_id: ProductId) -> DomainResult<i64> {
        self.engine.current_stock(product_id)
    }

    /// Snapshot row for one product. `NotFound` for unknown products.
    pub fn item(&self, product_id: ProductId) -> DomainResult<InventoryItem> {
        let product = self.catalog.product(product_id).ok_or(DomainError::NotFound)?;
        let quantity = self.engine.current_stock(product_id)?;
        Ok(InventoryItem {
            product_id,
            sku: product.sku,
            name: product.name,
            quantity,
            status: status_bucket(quantity, &self.config),
            last_updated: self.engine.stock_last_updated(product_id)?,
        })
    }

    /// One row per catalog product (zero-stock products included), ordered
    /// by SKU.
    pub fn snapshot(&self) -> DomainResult<Vec<InventoryItem>> {
        self.catalog
            .list_products()
            .into_iter()
            .map(|p| {
                let quantity = self.engine.current_stock(p.id)?;
                Ok(InventoryItem {
                    product_id: p.id,
                    sku: p.sku,
                    name: p.name,
                    quantity,
                    status: status_bucket(quantity, &self.config),
                    last_updated: self.engine.stock_last_updated(p.id)?,
                })
            })
            .collect()
    }

    /// Pure aggregation over all products, recomputed per call.
    pub fn summary(&self) -> DomainResult<InventorySummary> {
        let rows = self.snapshot()?;
        Ok(InventorySummary {
            total_products: rows.len(),
            total_units_in_stock: rows.iter().map(|r| r.quantity).sum(),
            low_stock_count: rows
                .iter()
                .filter(|r| r.status == StockStatus::LowStock)
                .count(),
            out_of_stock_count: rows
                .iter()
                .filter(|r| r.status == StockStatus::OutOfStock)
                .count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shopledger_auth::{Caller, Role};
    use shopledger_catalog::ProductStatus;
    use shopledger_core::{SupplierId, UserId};
    use shopledger_ledger::{LineInput, OrderType};
    use shopledger_parties::{ContactInfo, PartyStore};

    fn config(threshold: i64) -> InventoryConfig {
        InventoryConfig {
            low_stock_threshold: threshold,
        }
    }

    #[test]
    fn bucket_edges_at_default_threshold() {
        let cfg = InventoryConfig::default();
        assert_eq!(status_bucket(0, &cfg), StockStatus::OutOfStock);
        assert_eq!(status_bucket(1, &cfg), StockStatus::LowStock);
        assert_eq!(status_bucket(9, &cfg), StockStatus::LowStock);
        assert_eq!(status_bucket(10, &cfg), StockStatus::InStock);
        assert_eq!(status_bucket(100, &cfg), StockStatus::InStock);
    }

    #[test]
    fn bucket_threshold_is_configurable() {
        let cfg = config(3);
        assert_eq!(status_bucket(2, &cfg), StockStatus::LowStock);
        assert_eq!(status_bucket(3, &cfg), StockStatus::InStock);
    }

    struct Fixture {
        view: InventoryView,
        engine: Arc<LedgerEngine>,
        supplier_id: SupplierId,
        product_a: ProductId,
        product_b: ProductId,
    }

    fn fixture() -> Fixture {
        let catalog = Arc::new(CatalogStore::new());
        let parties = Arc::new(PartyStore::new());
        let category = catalog.create_category("Apparel", None).unwrap();
        let product_type = catalog.create_product_type("T-Shirts", category.id).unwrap();
        let product_a = catalog
            .create_product("SKU-A", "Tee A", category.id, product_type.id, ProductStatus::Active)
            .unwrap()
            .id;
        let product_b = catalog
            .create_product("SKU-B", "Tee B", category.id, product_type.id, ProductStatus::Active)
            .unwrap()
            .id;
        let supplier_id = parties
            .create_supplier("Textile Co", None, ContactInfo::default(), false)
            .unwrap()
            .id;
        let engine = Arc::new(LedgerEngine::new(catalog.clone(), parties));
        let view = InventoryView::new(engine.clone(), catalog);
        Fixture {
            view,
            engine,
            supplier_id,
            product_a,
            product_b,
        }
    }

    fn manager() -> Caller {
        Caller::new(UserId::new(), Role::Manager)
    }

    fn restock(fx: &Fixture, product_id: ProductId, quantity: i64) {
        fx.engine
            .commit_purchase_order(
                &manager(),
                fx.supplier_id,
                Utc::now(),
                &[LineInput {
                    product_id,
                    quantity,
                    unit_price: 100,
                }],
            )
            .unwrap();
    }

    #[test]
    fn read_after_commit_observes_the_commit() {
        let fx = fixture();
        assert_eq!(fx.view.current_stock(fx.product_a).unwrap(), 0);
        restock(&fx, fx.product_a, 7);
        assert_eq!(fx.view.current_stock(fx.product_a).unwrap(), 7);

        fx.engine
            .commit_sales_order(
                &manager(),
                None,
                Utc::now(),
                OrderType::Normal,
                &[LineInput {
                    product_id: fx.product_a,
                    quantity: 2,
                    unit_price: 100,
                }],
            )
            .unwrap();
        assert_eq!(fx.view.current_stock(fx.product_a).unwrap(), 5);
    }

    #[test]
    fn snapshot_includes_zero_stock_products() {
        let fx = fixture();
        restock(&fx, fx.product_a, 12);

        let rows = fx.view.snapshot().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sku, "SKU-A");
        assert_eq!(rows[0].quantity, 12);
        assert_eq!(rows[0].status, StockStatus::InStock);
        assert!(rows[0].last_updated.is_some());
        assert_eq!(rows[1].sku, "SKU-B");
        assert_eq!(rows[1].quantity, 0);
        assert_eq!(rows[1].status, StockStatus::OutOfStock);
        assert_eq!(rows[1].last_updated, None);
    }

    #[test]
    fn summary_counts_buckets() {
        let fx = fixture();
        restock(&fx, fx.product_a, 4); // low stock at default threshold

        let summary = fx.view.summary().unwrap();
        assert_eq!(summary.total_products, 2);
        assert_eq!(summary.total_units_in_stock, 4);
        assert_eq!(summary.low_stock_count, 1);
        assert_eq!(summary.out_of_stock_count, 1);
    }

    #[test]
    fn item_for_unknown_product_is_not_found() {
        let fx = fixture();
        let err = fx.view.item(ProductId::new()).unwrap_err();
        assert!(matches!(err, DomainError::NotFound));
    }

    #[test]
    fn item_reflects_configured_threshold() {
        let catalog = Arc::new(CatalogStore::new());
        let parties = Arc::new(PartyStore::new());
        let category = catalog.create_category("Apparel", None).unwrap();
        let product_type = catalog.create_product_type("T-Shirts", category.id).unwrap();
        let product = catalog
            .create_product("SKU-A", "Tee", category.id, product_type.id, ProductStatus::Active)
            .unwrap()
            .id;
        let supplier = parties
            .create_supplier("Textile Co", None, ContactInfo::default(), false)
            .unwrap()
            .id;
        let engine = Arc::new(LedgerEngine::new(catalog.clone(), parties));
        let view = InventoryView::with_config(engine.clone(), catalog, config(100));

        engine
            .commit_purchase_order(
                &manager(),
                supplier,
                Utc::now(),
                &[LineInput {
                    product_id: product,
                    quantity: 50,
                    unit_price: 100,
                }],
            )
            .unwrap();

        assert_eq!(view.item(product).unwrap().status, StockStatus::LowStock);
    }
}
