//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::form::SubmissionLog;
use crate::store::ShopStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It is generic over the store
/// capability so the integration tests can inject an in-memory fake in place
/// of the Supabase client.
#[derive(Clone)]
pub struct AppState<S> {
    inner: Arc<AppStateInner<S>>,
}

struct AppStateInner<S> {
    config: StorefrontConfig,
    store: S,
    submissions: SubmissionLog,
}

impl<S: ShopStore> AppState<S> {
    /// Create a new application state.
    pub fn new(config: StorefrontConfig, store: S) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                submissions: SubmissionLog::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the data store client.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.inner.store
    }

    /// Get a reference to the submission token log.
    #[must_use]
    pub fn submissions(&self) -> &SubmissionLog {
        &self.inner.submissions
    }
}
