use axum::Router;

pub mod catalog;
pub mod inventory;
pub mod orders;
pub mod parties;
pub mod reports;
pub mod system;
pub mod users;

/// All protected routes.
pub fn router() -> Router {
    Router::new()
        .merge(catalog::router())
        .merge(parties::router())
        .merge(orders::router())
        .merge(inventory::router())
        .merge(reports::router())
        .merge(users::router())
}
