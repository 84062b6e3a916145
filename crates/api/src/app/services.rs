use std::sync::Arc;

use shopledger_auth::{Role, UserDirectory};
use shopledger_catalog::CatalogStore;
use shopledger_inventory::{InventoryConfig, InventoryView};
use shopledger_ledger::{LedgerConfig, LedgerEngine};
use shopledger_parties::PartyStore;
use shopledger_reporting::{Dashboard, ReportExporter};

use crate::tokens::TokenRegistry;

/// Process configuration resolved at the binary boundary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub admin_email: String,
    pub admin_token: String,
    pub inventory: InventoryConfig,
    pub ledger: LedgerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            admin_email: "admin@shopledger.local".to_string(),
            admin_token: "dev-admin-token".to_string(),
            inventory: InventoryConfig::default(),
            ledger: LedgerConfig::default(),
        }
    }
}

/// All wired services shared by route handlers.
#[derive(Debug)]
pub struct AppServices {
    pub users: Arc<UserDirectory>,
    pub tokens: Arc<TokenRegistry>,
    pub catalog: Arc<CatalogStore>,
    pub parties: Arc<PartyStore>,
    pub engine: Arc<LedgerEngine>,
    pub inventory: Arc<InventoryView>,
    pub exporter: Arc<ReportExporter>,
    pub dashboard: Arc<Dashboard>,
}

/// Wire up in-memory services and seed the bootstrap admin.
pub fn build_services(config: &AppConfig) -> Arc<AppServices> {
    let users = Arc::new(UserDirectory::new());
    let tokens = Arc::new(TokenRegistry::new());
    let catalog = Arc::new(CatalogStore::new());
    let parties = Arc::new(PartyStore::new());
    let engine = Arc::new(LedgerEngine::with_config(
        catalog.clone(),
        parties.clone(),
        config.ledger,
    ));
    let inventory = Arc::new(InventoryView::with_config(
        engine.clone(),
        catalog.clone(),
        config.inventory,
    ));
    let exporter = Arc::new(ReportExporter::new(
        engine.clone(),
        parties.clone(),
        inventory.clone(),
    ));
    let dashboard = Arc::new(Dashboard::new(
        engine.clone(),
        parties.clone(),
        inventory.clone(),
    ));

    // Bootstrap admin so the directory is reachable from the outside.
    match users.register(config.admin_email.clone(), "Administrator", Role::Admin) {
        Ok(admin) => tokens.insert(config.admin_token.clone(), admin.id),
        Err(e) => tracing::warn!("failed to seed bootstrap admin: {e}"),
    }

    Arc::new(AppServices {
        users,
        tokens,
        catalog,
        parties,
        engine,
        inventory,
        exporter,
        dashboard,
    })
}
