//! Firmdesk Server — HTTP boundary for the record-management service.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use surrealdb::Connection;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the API router over the shared state.
pub fn router<C: Connection>(state: Arc<AppState<C>>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::health))
        // Auth
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route(
            "/api/auth/password-recovery",
            post(handlers::auth::password_recovery),
        )
        .route(
            "/api/auth/password-reset",
            post(handlers::auth::password_reset),
        )
        // Clients
        .route(
            "/api/clients",
            get(handlers::clients::list).post(handlers::clients::create),
        )
        .route(
            "/api/clients/{id}",
            get(handlers::clients::get_one)
                .put(handlers::clients::update)
                .delete(handlers::clients::remove),
        )
        .route(
            "/api/clients/export/{format}",
            get(handlers::export::export_clients),
        )
        // Couriers
        .route(
            "/api/couriers",
            get(handlers::couriers::list).post(handlers::couriers::create),
        )
        .route(
            "/api/couriers/{id}",
            get(handlers::couriers::get_one)
                .put(handlers::couriers::update)
                .delete(handlers::couriers::remove),
        )
        // Catalog
        .route(
            "/api/products",
            get(handlers::catalog::list_products).post(handlers::catalog::create_product),
        )
        .route(
            "/api/products/{id}",
            get(handlers::catalog::get_product)
                .put(handlers::catalog::update_product)
                .delete(handlers::catalog::remove_product),
        )
        .route(
            "/api/categories",
            get(handlers::catalog::list_categories).post(handlers::catalog::create_category),
        )
        .route(
            "/api/categories/{id}",
            delete(handlers::catalog::remove_category),
        )
        // Orders and their items
        .route(
            "/api/orders",
            get(handlers::orders::list).post(handlers::orders::create),
        )
        .route(
            "/api/orders/{id}",
            get(handlers::orders::get_one)
                .put(handlers::orders::update)
                .delete(handlers::orders::remove),
        )
        .route(
            "/api/orders/{id}/items",
            get(handlers::orders::list_items).post(handlers::orders::add_item),
        )
        .route(
            "/api/orders/{id}/items/{item_id}",
            delete(handlers::orders::remove_item),
        )
        // Payments
        .route(
            "/api/payments",
            get(handlers::payments::list).post(handlers::payments::create),
        )
        .route(
            "/api/payments/{id}",
            get(handlers::payments::get_one)
                .put(handlers::payments::update)
                .delete(handlers::payments::remove),
        )
        // Feedback
        .route(
            "/api/feedback",
            get(handlers::feedback::list).post(handlers::feedback::create),
        )
        .route(
            "/api/feedback/{id}",
            get(handlers::feedback::get_one)
                .put(handlers::feedback::update)
                .delete(handlers::feedback::remove),
        )
        // Status dictionaries
        .route(
            "/api/order-statuses",
            get(handlers::statuses::list_order).post(handlers::statuses::create_order),
        )
        .route(
            "/api/order-statuses/{id}",
            delete(handlers::statuses::remove_order),
        )
        .route(
            "/api/payment-statuses",
            get(handlers::statuses::list_payment).post(handlers::statuses::create_payment),
        )
        .route(
            "/api/payment-statuses/{id}",
            delete(handlers::statuses::remove_payment),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
