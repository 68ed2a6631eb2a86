//! UPI Transaction Service.
//!
//! A minimal payments ledger: users register with a phone number, toggle a
//! UPI-enablement flag, deposit funds, and transfer funds to each other
//! subject to per-transfer and daily aggregate limits.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx, behind the [`store::Store`] trait
//! - **Concurrency**: per-user async locks serialize balance mutations
//! - **Format**: JSON requests, uniform success/message/data envelopes
//!
//! The router is built here so integration tests can mount the same app over
//! the in-memory store.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod locks;
pub mod models;
pub mod response;
pub mod services;
pub mod state;
pub mod store;

use axum::{
    Router,
    routing::{get, patch, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use state::AppState;

/// Build the application router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Service monitoring
        .route("/health", get(handlers::health::health_check))
        // User management routes
        .route("/api/users", post(handlers::users::register))
        .route(
            "/api/users/validate/{phone_number}",
            get(handlers::users::validate_user),
        )
        .route(
            "/api/users/validate-receiver",
            get(handlers::users::validate_receiver),
        )
        .route(
            "/api/users/{phone_number}",
            get(handlers::users::get_user_info),
        )
        // UPI money-movement routes
        .route(
            "/api/upi/upi-status/{phone_number}",
            patch(handlers::upi::update_upi_status),
        )
        .route(
            "/api/upi/balance/{phone_number}",
            get(handlers::upi::get_balance),
        )
        .route(
            "/api/upi/add-money/{phone_number}",
            put(handlers::upi::add_money),
        )
        .route("/api/upi/transfer", post(handlers::upi::transfer))
        // Request tracing for observability
        .layer(TraceLayer::new_for_http())
        // The service fronts a browser client; mirror its allow-all policy
        .layer(CorsLayer::permissive())
        .with_state(state)
}
