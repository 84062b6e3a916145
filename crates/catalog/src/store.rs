//! In-memory catalog store.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use shopledger_core::{CategoryId, DomainError, DomainResult, ProductId, ProductTypeId, RefKind};

use crate::{Category, Product, ProductStatus, ProductType};

#[derive(Debug, Default)]
struct CatalogState {
    categories: HashMap<CategoryId, Category>,
    types: HashMap<ProductTypeId, ProductType>,
    products: HashMap<ProductId, Product>,
}

/// Thread-safe store of catalog reference data.
///
/// Writes validate references and uniqueness before mutating; a failed call
/// leaves the catalog untouched.
#[derive(Debug, Default)]
pub struct CatalogStore {
    inner: RwLock<CatalogState>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Categories ──────────────────────────────────────────────────────

    pub fn create_category(
        &self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> DomainResult<Category> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("category name cannot be empty"));
        }

        let mut state = self.write()?;
        let category = Category {
            id: CategoryId::new(),
            name,
            description,
            created_at: Utc::now(),
        };
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    pub fn update_category(
        &self,
        id: CategoryId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> DomainResult<Category> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("category name cannot be empty"));
        }

        let mut state = self.write()?;
        let category = state.categories.get_mut(&id).ok_or(DomainError::NotFound)?;
        category.name = name;
        category.description = description;
        Ok(category.clone())
    }

    /// Delete a category.
    ///
    /// Rejected with `Conflict` while any product type or product still
    /// references it.
    pub fn delete_category(&self, id: CategoryId) -> DomainResult<()> {
        let mut state = self.write()?;
        if !state.categories.contains_key(&id) {
            return Err(DomainError::NotFound);
        }
        if state.types.values().any(|t| t.category_id == id) {
            return Err(DomainError::conflict(
                "category is referenced by a product type",
            ));
        }
        if state.products.values().any(|p| p.category_id == id) {
            return Err(DomainError::conflict("category is referenced by a product"));
        }
        state.categories.remove(&id);
        Ok(())
    }

    pub fn category(&self, id: CategoryId) -> Option<Category> {
        self.inner.read().ok()?.categories.get(&id).cloned()
    }

    pub fn list_categories(&self) -> Vec<Category> {
        let state = match self.inner.read() {
            Ok(guard) => guard,
            Err(_) => return Vec::new(),
        };
        let mut all: Vec<Category> = state.categories.values().cloned().collect();
        all.sort_by_key(|c| c.id);
        all
    }

    // ── Product types ───────────────────────────────────────────────────

    pub fn create_product_type(
        &self,
        name: impl Into<String>,
        category_id: CategoryId,
    ) -> DomainResult<ProductType> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("product type name cannot be empty"));
        }

        let mut state = self.write()?;
        if !state.categories.contains_key(&category_id) {
            return Err(DomainError::invalid_reference(RefKind::Category, category_id));
        }
        let product_type = ProductType {
            id: ProductTypeId::new(),
            name,
            category_id,
            created_at: Utc::now(),
        };
        state.types.insert(product_type.id, product_type.clone());
        Ok(product_type)
    }

    pub fn product_type(&self, id: ProductTypeId) -> Option<ProductType> {
        self.inner.read().ok()?.types.get(&id).cloned()
    }

    pub fn list_product_types(&self) -> Vec<ProductType> {
        let state = match self.inner.read() {
            Ok(guard) => guard,
            Err(_) => return Vec::new(),
        };
        let mut all: Vec<ProductType> = state.types.values().cloned().collect();
        all.sort_by_key(|t| t.id);
        all
    }

    // ── Products ────────────────────────────────────────────────────────

    pub fn create_product(
        &self,
        sku: impl Into<String>,
        name: impl Into<String>,
        category_id: CategoryId,
        type_id: ProductTypeId,
        status: ProductStatus,
    ) -> DomainResult<Product> {
        let sku = sku.into().trim().to_string();
        let name = name.into().trim().to_string();
        if sku.is_empty() {
            return Err(DomainError::validation("SKU cannot be empty"));
        }
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }

        let mut state = self.write()?;
        if !state.categories.contains_key(&category_id) {
            return Err(DomainError::invalid_reference(RefKind::Category, category_id));
        }
        if !state.types.contains_key(&type_id) {
            return Err(DomainError::invalid_reference(RefKind::ProductType, type_id));
        }
        if state.products.values().any(|p| p.sku == sku) {
            return Err(DomainError::conflict(format!("SKU already exists: {sku}")));
        }

        let product = Product {
            id: ProductId::new(),
            sku,
            name,
            category_id,
            type_id,
            status,
            created_at: Utc::now(),
        };
        state.products.insert(product.id, product.clone());
        Ok(product)
    }

    pub fn update_product(
        &self,
        id: ProductId,
        sku: impl Into<String>,
        name: impl Into<String>,
        category_id: CategoryId,
        type_id: ProductTypeId,
        status: ProductStatus,
    ) -> DomainResult<Product> {
        let sku = sku.into().trim().to_string();
        let name = name.into().trim().to_string();
        if sku.is_empty() {
            return Err(DomainError::validation("SKU cannot be empty"));
        }
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }

        let mut state = self.write()?;
        if !state.products.contains_key(&id) {
            return Err(DomainError::NotFound);
        }
        if !state.categories.contains_key(&category_id) {
            return Err(DomainError::invalid_reference(RefKind::Category, category_id));
        }
        if !state.types.contains_key(&type_id) {
            return Err(DomainError::invalid_reference(RefKind::ProductType, type_id));
        }
        if state.products.values().any(|p| p.sku == sku && p.id != id) {
            return Err(DomainError::conflict(format!("SKU already exists: {sku}")));
        }

        let product = state.products.get_mut(&id).ok_or(DomainError::NotFound)?;
        product.sku = sku;
        product.name = name;
        product.category_id = category_id;
        product.type_id = type_id;
        product.status = status;
        Ok(product.clone())
    }

    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.inner.read().ok()?.products.get(&id).cloned()
    }

    /// All products, ordered by SKU.
    pub fn list_products(&self) -> Vec<Product> {
        let state = match self.inner.read() {
            Ok(guard) => guard,
            Err(_) => return Vec::new(),
        };
        let mut all: Vec<Product> = state.products.values().cloned().collect();
        all.sort_by(|a, b| a.sku.cmp(&b.sku));
        all
    }

    fn write(&self) -> DomainResult<std::sync::RwLockWriteGuard<'_, CatalogState>> {
        self.inner
            .write()
            .map_err(|_| DomainError::conflict("catalog lock poisoned"))
    }
}
