//! Report export: CSV over a date range.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use core::str::FromStr;
use thiserror::Error;

use shopledger_core::{DomainError, DomainResult};
use shopledger_inventory::InventoryView;
use shopledger_ledger::{LedgerEngine, OrderFilter, PaymentStatus, PurchaseOrder, SalesOrder};
use shopledger_parties::PartyStore;

/// Supported report kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Sales,
    Purchases,
    Inventory,
    Cashflow,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Sales => "sales",
            ReportType::Purchases => "purchases",
            ReportType::Inventory => "inventory",
            ReportType::Cashflow => "cashflow",
        }
    }
}

impl core::fmt::Display for ReportType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sales" => Ok(ReportType::Sales),
            "purchases" => Ok(ReportType::Purchases),
            "inventory" => Ok(ReportType::Inventory),
            "cashflow" => Ok(ReportType::Cashflow),
            other => Err(DomainError::validation(format!(
                "unknown report type '{other}' (expected sales, purchases, inventory or cashflow)"
            ))),
        }
    }
}

/// Export failure: either a domain rejection or a CSV/IO fault.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv flush failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Suggested attachment filename for an export.
pub fn export_filename(
    report_type: ReportType,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> String {
    format!(
        "{}_report_{}_{}.csv",
        report_type,
        start.date_naive(),
        end.date_naive()
    )
}

/// Minor-unit amount as a decimal string ("20000" cents -> "200.00").
fn format_minor(amount: u64) -> String {
    format!("{}.{:02}", amount / 100, amount % 100)
}

fn format_minor_signed(amount: i128) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Produces tabular exports from committed ledger state.
#[derive(Debug)]
pub struct ReportExporter {
    engine: Arc<LedgerEngine>,
    parties: Arc<PartyStore>,
    view: Arc<InventoryView>,
}

impl ReportExporter {
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

    /// Export one report over `[start, end]` (inclusive) as CSV bytes.
    pub fn export(
        &self,
        report_type: ReportType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<u8>, ExportError> {
        validate_range(start, end)?;
        match report_type {
            ReportType::Sales => self.export_sales(start, end),
            ReportType::Purchases => self.export_purchases(start, end),
            ReportType::Inventory => self.export_inventory(),
            ReportType::Cashflow => self.export_cashflow(start, end),
        }
    }

    fn sales_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<SalesOrder> {
        let filter = OrderFilter {
            from: Some(start),
            to: Some(end),
            payment_status: None,
        };
        let mut orders: Vec<SalesOrder> = self.engine.list_sales_orders(&filter).collect();
        // Spreadsheets read top-down: chronological order.
        orders.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        orders
    }

    fn purchases_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<PurchaseOrder> {
        let filter = OrderFilter {
            from: Some(start),
            to: Some(end),
            payment_status: None,
        };
        let mut orders: Vec<PurchaseOrder> = self.engine.list_purchase_orders(&filter).collect();
        orders.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        orders
    }

    fn export_sales(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<u8>, ExportError> {
        let mut buf = Vec::new();
        {
            let mut wtr = csv::Writer::from_writer(&mut buf);
            wtr.write_record([
                "order_id",
                "date",
                "customer",
                "order_type",
                "total_amount",
                "payment_status",
            ])?;
            for order in self.sales_in_range(start, end) {
                let customer = order
                    .customer_id
                    .and_then(|id| self.parties.customer(id))
                    .map(|c| c.name)
                    .unwrap_or_default();
                wtr.write_record([
                    order.id.to_string(),
                    order.date.to_rfc3339(),
                    customer,
                    order.order_type.to_string(),
                    format_minor(order.total_amount),
                    order.payment_status.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        Ok(buf)
    }

    fn export_purchases(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<u8>, ExportError> {
        let mut buf = Vec::new();
        {
            let mut wtr = csv::Writer::from_writer(&mut buf);
            wtr.write_record([
                "order_id",
                "date",
                "supplier",
                "total_amount",
                "payment_status",
            ])?;
            for order in self.purchases_in_range(start, end) {
                let supplier = self
                    .parties
                    .supplier(order.supplier_id)
                    .map(|s| s.name)
                    .unwrap_or_default();
                wtr.write_record([
                    order.id.to_string(),
                    order.date.to_rfc3339(),
                    supplier,
                    format_minor(order.total_amount),
                    order.payment_status.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        Ok(buf)
    }

    /// Inventory is a snapshot at export time; the date range only gates the
    /// request shape.
    fn export_inventory(&self) -> Result<Vec<u8>, ExportError> {
        let rows = self.view.snapshot().map_err(ExportError::Domain)?;
        let mut buf = Vec::new();
        {
            let mut wtr = csv::Writer::from_writer(&mut buf);
            wtr.write_record([
                "product_id",
                "sku",
                "name",
                "quantity",
                "status",
                "last_updated",
            ])?;
            for row in rows {
                wtr.write_record([
                    row.product_id.to_string(),
                    row.sku,
                    row.name,
                    row.quantity.to_string(),
                    row.status.to_string(),
                    row.last_updated.map(|t| t.to_rfc3339()).unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        Ok(buf)
    }

    /// Daily paid-sales minus paid-purchases, one row per day with activity.
    fn export_cashflow(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<u8>, ExportError> {
        let mut days: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
        for order in self.sales_in_range(start, end) {
            if order.payment_status == PaymentStatus::Paid {
                days.entry(order.date.date_naive()).or_insert((0, 0)).0 += order.total_amount;
            }
        }
        for order in self.purchases_in_range(start, end) {
            if order.payment_status == PaymentStatus::Paid {
                days.entry(order.date.date_naive()).or_insert((0, 0)).1 += order.total_amount;
            }
        }

        let mut buf = Vec::new();
        {
            let mut wtr = csv::Writer::from_writer(&mut buf);
            wtr.write_record(["date", "sales_paid", "purchases_paid", "net"])?;
            for (date, (sales, purchases)) in days {
                let net = sales as i128 - purchases as i128;
                wtr.write_record([
                    date.to_string(),
                    format_minor(sales),
                    format_minor(purchases),
                    format_minor_signed(net),
                ])?;
            }
            wtr.flush()?;
        }
        Ok(buf)
    }
}

fn validate_range(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<()> {
    if start > end {
        return Err(DomainError::InvalidRange { start, end });
    }
    Ok(())
}
