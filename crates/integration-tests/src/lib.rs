//! Integration test harness for the booking storefront.
//!
//! Provides an in-memory [`FakeStore`] implementing the storefront's
//! `ShopStore` capability, plus helpers to build the real router around it.
//! Tests drive the router directly with `tower::ServiceExt::oneshot`; no
//! server or network is involved.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};

use axum::Router;
use secrecy::SecretString;
use url::Url;

use legion_booking_storefront::config::{StorefrontConfig, SupabaseConfig};
use legion_booking_storefront::routes;
use legion_booking_storefront::state::AppState;
use legion_booking_storefront::store::{NewReservation, Shop, ShopStore, StoreError};

/// In-memory stand-in for the hosted store.
///
/// Records every inserted reservation so tests can assert on the exact
/// write traffic, and can be told to fail either side of the boundary.
#[derive(Debug, Clone, Default)]
pub struct FakeStore {
    shops: Vec<Shop>,
    fail_fetch: bool,
    fail_insert: bool,
    inserted: Arc<Mutex<Vec<NewReservation>>>,
}

impl FakeStore {
    /// A store that returns the given shop directory.
    #[must_use]
    pub fn with_shops(shops: Vec<Shop>) -> Self {
        Self {
            shops,
            ..Self::default()
        }
    }

    /// A store whose directory read always fails.
    #[must_use]
    pub fn failing_fetch() -> Self {
        Self {
            fail_fetch: true,
            ..Self::default()
        }
    }

    /// A store that lists shops but rejects every insert.
    #[must_use]
    pub fn failing_insert(shops: Vec<Shop>) -> Self {
        Self {
            shops,
            fail_insert: true,
            ..Self::default()
        }
    }

    /// Reservations written so far, in insertion order.
    #[must_use]
    pub fn inserted(&self) -> Vec<NewReservation> {
        self.inserted.lock().expect("reservation log poisoned").clone()
    }
}

impl ShopStore for FakeStore {
    fn list_shops(&self) -> impl Future<Output = Result<Vec<Shop>, StoreError>> + Send {
        let result = if self.fail_fetch {
            Err(StoreError::Api {
                status: 500,
                message: "directory unavailable".to_string(),
            })
        } else {
            Ok(self.shops.clone())
        };
        async move { result }
    }

    fn create_reservation(
        &self,
        reservation: &NewReservation,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        let result = if self.fail_insert {
            Err(StoreError::Api {
                status: 500,
                message: "insert rejected".to_string(),
            })
        } else {
            self.inserted
                .lock()
                .expect("reservation log poisoned")
                .push(reservation.clone());
            Ok(())
        };
        async move { result }
    }
}

/// Configuration pointing at a store that is never contacted.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        supabase: SupabaseConfig {
            url: Url::parse("https://project.supabase.test").expect("static test URL"),
            anon_key: SecretString::from("test-anon-key"),
        },
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Build the full application router over a fake store.
#[must_use]
pub fn test_app(store: FakeStore) -> Router {
    routes::app(AppState::new(test_config(), store))
}
