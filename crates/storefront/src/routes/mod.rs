//! HTTP route handlers for the booking storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /          - Booking page (shop directory + reservation form)
//! POST /reservas  - Submit a reservation
//! GET  /health    - Health check
//! ```
//!
//! The booking page carries its form state in the query string: `mode`
//! selects the presentation variant, `barberia` the selected shop, and
//! `fecha`/`servicio`/`notice` round-trip through the submit redirect.

pub mod booking;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;
use crate::store::ShopStore;

/// Create the booking routes router.
pub fn routes<S: ShopStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/", get(booking::page::<S>))
        .route("/reservas", post(booking::reserve::<S>))
}

/// Build the full application for the given state.
pub fn app<S: ShopStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::<S>())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the hosted store.
async fn health() -> &'static str {
    "ok"
}
