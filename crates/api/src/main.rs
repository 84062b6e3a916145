use shopledger_api::AppConfig;
use shopledger_auth::Role;
use shopledger_inventory::InventoryConfig;
use shopledger_ledger::LedgerConfig;

#[tokio::main]
async fn main() {
    shopledger_observability::init();

    let admin_token = std::env::var("ADMIN_TOKEN").unwrap_or_else(|_| {
        tracing::warn!("ADMIN_TOKEN not set; using insecure dev default");
        "dev-admin-token".to_string()
    });
    let low_stock_threshold = std::env::var("LOW_STOCK_THRESHOLD")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    let payment_update_role = std::env::var("PAYMENT_UPDATE_ROLE")
        .ok()
        .and_then(|v| v.parse::<Role>().ok())
        .unwrap_or(Role::Employee);

    let config = AppConfig {
        admin_token,
        inventory: InventoryConfig {
            low_stock_threshold,
        },
        ledger: LedgerConfig {
            payment_update_role,
        },
        ..AppConfig::default()
    };

    let app = shopledger_api::app::build_app(config).await;

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
