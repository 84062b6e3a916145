//! Categories and product types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopledger_core::{CategoryId, ProductTypeId};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A product type, always belonging to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: ProductTypeId,
    pub name: String,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
}
