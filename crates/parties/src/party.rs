//! Customer and supplier records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopledger_core::{CustomerId, SupplierId};

/// Contact information shared by both party kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// A customer. Sales orders may reference one; walk-in sales reference none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub contact: ContactInfo,
    /// Optional customer grouping (e.g. "wholesale", "vip").
    pub group: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A supplier. Every purchase order references exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub contact_person: Option<String>,
    pub contact: ContactInfo,
    pub has_vat: bool,
    pub created_at: DateTime<Utc>,
}
