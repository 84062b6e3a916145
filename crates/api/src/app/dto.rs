//! Request DTOs and parsing helpers.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use shopledger_core::{DomainResult, ProductId};
use shopledger_ledger::{LineInput, OrderFilter, PaymentStatus};

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductTypeRequest {
    pub name: String,
    pub category_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub sku: String,
    pub name: String,
    pub category_id: String,
    pub type_id: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub group: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSupplierRequest {
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub has_vat: bool,
}

#[derive(Debug, Deserialize)]
pub struct OrderLineRequest {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreatePurchaseOrderRequest {
    pub supplier_id: String,
    pub date: DateTime<Utc>,
    pub lines: Vec<OrderLineRequest>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSalesOrderRequest {
    pub customer_id: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub order_type: Option<String>,
    pub lines: Vec<OrderLineRequest>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub report_type: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub display_name: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// Listing filters as query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub payment_status: Option<String>,
}

impl OrderListQuery {
    pub fn to_filter(&self) -> DomainResult<OrderFilter> {
        let payment_status = match &self.payment_status {
            Some(raw) => Some(raw.parse::<PaymentStatus>()?),
            None => None,
        };
        Ok(OrderFilter {
            from: self.from,
            to: self.to,
            payment_status,
        })
    }
}

/// Parse submitted order lines into domain line inputs.
///
/// Quantity/price *values* are validated by the engine; only id syntax is
/// checked here.
pub fn parse_lines(lines: &[OrderLineRequest]) -> DomainResult<Vec<LineInput>> {
    lines
        .iter()
        .map(|l| {
            let product_id: ProductId = l.product_id.parse()?;
            Ok(LineInput {
                product_id,
                quantity: l.quantity,
                unit_price: l.unit_price,
            })
        })
        .collect()
}
