//! Hosted data store boundary.
//!
//! # Architecture
//!
//! - The hosted store (Supabase) is the source of truth - NO local sync,
//!   direct REST calls per request
//! - Shops are read-only here; reservations are write-only
//! - Handlers depend on the [`ShopStore`] capability rather than a concrete
//!   client, so tests can substitute an in-memory fake

mod supabase;

pub use supabase::SupabaseStore;

use legion_booking_core::ShopId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Collection holding barbershop records.
pub const SHOPS_TABLE: &str = "barberias";

/// Collection receiving reservation records.
pub const RESERVATIONS_TABLE: &str = "reservas";

/// Errors that can occur when talking to the hosted store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Store returned a non-success status.
    #[error("Store error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response or build a request.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A barbershop location record, as stored in the `barberias` collection.
///
/// Created and updated externally; this system only reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "ubicacion")]
    pub location: String,
}

/// A reservation record to insert into the `reservas` collection.
///
/// The date travels as an opaque string; its format is not constrained at
/// this layer. The service label is free text (the styled page offers the
/// fixed `ServiceKind` menu but the store accepts any label).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    #[serde(rename = "barberia_id")]
    pub shop_id: ShopId,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "servicio")]
    pub service: String,
}

/// Capability for reading shops and writing reservations.
///
/// Implemented by [`SupabaseStore`] in production and by an in-memory fake in
/// the integration tests. Futures are `Send` so handlers stay spawnable.
pub trait ShopStore: Clone + Send + Sync + 'static {
    /// Fetch all shop records, in store order.
    fn list_shops(&self) -> impl Future<Output = Result<Vec<Shop>, StoreError>> + Send;

    /// Insert exactly one reservation record.
    fn create_reservation(
        &self,
        reservation: &NewReservation,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
