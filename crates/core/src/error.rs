//! Domain error model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Which kind of entity a dangling reference pointed at.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    Product,
    Category,
    ProductType,
    Customer,
    Supplier,
}

impl core::fmt::Display for RefKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            RefKind::Product => "product",
            RefKind::Category => "category",
            RefKind::ProductType => "product type",
            RefKind::Customer => "customer",
            RefKind::Supplier => "supplier",
        };
        f.write_str(s)
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic business/domain failures (validation,
/// invariants, conflicts). Every variant carries enough structure (kind +
/// offending field/id) for a caller to render a user-facing message.
/// Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A referenced entity (supplier, customer, product, ...) does not exist.
    #[error("unknown {kind}: {id}")]
    InvalidReference { kind: RefKind, id: String },

    /// An order line failed validation (non-positive quantity, negative price).
    #[error("invalid order line: {reason}")]
    InvalidLine { reason: String },

    /// An order was submitted without any lines.
    #[error("order has no lines")]
    EmptyOrder,

    /// A sales order asked for more units than the ledger holds.
    #[error(
        "insufficient stock for product {product_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// A sales order referenced a product that is not active.
    #[error("product {product_id} is inactive")]
    ProductInactive { product_id: ProductId },

    /// A reporting date range with start after end.
    #[error("invalid date range: {start} is after {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// The caller's role does not clear the gate for this operation.
    #[error("forbidden: requires role '{required}'")]
    Forbidden { required: String },

    /// A value failed validation (e.g. malformed or empty input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A conflict occurred (duplicate SKU, entity still referenced, ...).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_reference(kind: RefKind, id: impl core::fmt::Display) -> Self {
        Self::InvalidReference {
            kind,
            id: id.to_string(),
        }
    }

    pub fn invalid_line(reason: impl Into<String>) -> Self {
        Self::InvalidLine {
            reason: reason.into(),
        }
    }

    pub fn forbidden(required: impl Into<String>) -> Self {
        Self::Forbidden {
            required: required.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
