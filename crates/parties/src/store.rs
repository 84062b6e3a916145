//! In-memory party store.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use shopledger_core::{CustomerId, DomainError, DomainResult, SupplierId};

use crate::{ContactInfo, Customer, Supplier};

#[derive(Debug, Default)]
struct PartyState {
    customers: HashMap<CustomerId, Customer>,
    suppliers: HashMap<SupplierId, Supplier>,
}

/// Thread-safe store of customers and suppliers.
#[derive(Debug, Default)]
pub struct PartyStore {
    inner: RwLock<PartyState>,
}

impl PartyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_customer(
        &self,
        name: impl Into<String>,
        contact: ContactInfo,
        group: Option<String>,
        notes: Option<String>,
    ) -> DomainResult<Customer> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }

        let mut state = self.write()?;
        let customer = Customer {
            id: CustomerId::new(),
            name,
            contact,
            group,
            notes,
            created_at: Utc::now(),
        };
        state.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    pub fn update_customer(
        &self,
        id: CustomerId,
        name: impl Into<String>,
        contact: ContactInfo,
        group: Option<String>,
        notes: Option<String>,
    ) -> DomainResult<Customer> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }

        let mut state = self.write()?;
        let customer = state.customers.get_mut(&id).ok_or(DomainError::NotFound)?;
        customer.name = name;
        customer.contact = contact;
        customer.group = group;
        customer.notes = notes;
        Ok(customer.clone())
    }

    pub fn customer(&self, id: CustomerId) -> Option<Customer> {
        self.inner.read().ok()?.customers.get(&id).cloned()
    }

    pub fn list_customers(&self) -> Vec<Customer> {
        let state = match self.inner.read() {
            Ok(guard) => guard,
            Err(_) => return Vec::new(),
        };
        let mut all: Vec<Customer> = state.customers.values().cloned().collect();
        all.sort_by_key(|c| c.id);
        all
    }

    pub fn create_supplier(
        &self,
        name: impl Into<String>,
        contact_person: Option<String>,
        contact: ContactInfo,
        has_vat: bool,
    ) -> DomainResult<Supplier> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("supplier name cannot be empty"));
        }

        let mut state = self.write()?;
        let supplier = Supplier {
            id: SupplierId::new(),
            name,
            contact_person,
            contact,
            has_vat,
            created_at: Utc::now(),
        };
        state.suppliers.insert(supplier.id, supplier.clone());
        Ok(supplier)
    }

    pub fn supplier(&self, id: SupplierId) -> Option<Supplier> {
        self.inner.read().ok()?.suppliers.get(&id).cloned()
    }

    pub fn list_suppliers(&self) -> Vec<Supplier> {
        let state = match self.inner.read() {
            Ok(guard) => guard,
            Err(_) => return Vec::new(),
        };
        let mut all: Vec<Supplier> = state.suppliers.values().cloned().collect();
        all.sort_by_key(|s| s.id);
        all
    }

    fn write(&self) -> DomainResult<std::sync::RwLockWriteGuard<'_, PartyState>> {
        self.inner
            .write()
            .map_err(|_| DomainError::conflict("party store lock poisoned"))
    }
}
