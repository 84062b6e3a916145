//! `shopledger-catalog` — products, categories and product types.
//!
//! The catalog is the source of product identity and active/inactive status.
//! Stock is *not* kept here; it is derived from the stock ledger.

pub mod category;
pub mod product;
pub mod store;

pub use category::{Category, ProductType};
pub use product::{Product, ProductStatus};
pub use store::CatalogStore;
