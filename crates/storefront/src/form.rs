//! Booking form state machine.
//!
//! The form moves through `Idle` → `ShopSelected` → `Submitting` and back:
//! a successful submission resets every field so the page returns to its
//! initial unselected state, while a failed one keeps the user's input and
//! returns to `ShopSelected`. The explicit `Submitting` phase exists so a
//! second submit cannot start while one is in flight; across requests the
//! same guarantee comes from [`SubmissionLog`], which spends each rendered
//! form's token on first use.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use legion_booking_core::ShopId;
use thiserror::Error;
use uuid::Uuid;

use crate::store::NewReservation;

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// No shop selected; the reservation form is hidden.
    #[default]
    Idle,
    /// A shop is selected and the form is visible.
    ShopSelected,
    /// A write to the store is in flight.
    Submitting,
}

/// Reasons a submission cannot start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    /// One or more of shop, date, and service is empty.
    #[error("shop, date, and service are all required")]
    Incomplete,
    /// A submission is already in flight.
    #[error("a submission is already in flight")]
    InFlight,
}

/// The booking form: a selected shop, a date string, and a service label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    shop: Option<ShopId>,
    date: String,
    service: String,
    phase: FormPhase,
}

impl BookingForm {
    /// An empty form with no shop selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a form from submitted field values.
    #[must_use]
    pub fn with_fields(
        shop: Option<ShopId>,
        date: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        let phase = if shop.is_some() {
            FormPhase::ShopSelected
        } else {
            FormPhase::Idle
        };
        Self {
            shop,
            date: date.into(),
            service: service.into(),
            phase,
        }
    }

    /// Select a shop, making the reservation form visible.
    pub const fn select_shop(&mut self, shop: ShopId) {
        self.shop = Some(shop);
        if matches!(self.phase, FormPhase::Idle) {
            self.phase = FormPhase::ShopSelected;
        }
    }

    #[must_use]
    pub const fn shop(&self) -> Option<ShopId> {
        self.shop
    }

    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting)
    }

    /// Start a submission.
    ///
    /// Only succeeds when shop, date, and service are all present; no
    /// partial submission ever reaches the store.
    ///
    /// # Errors
    ///
    /// [`FormError::Incomplete`] when a field is empty (the form is left
    /// untouched), [`FormError::InFlight`] when a submission is already
    /// running.
    pub fn begin_submit(&mut self) -> Result<NewReservation, FormError> {
        if self.is_submitting() {
            return Err(FormError::InFlight);
        }

        let Some(shop_id) = self.shop else {
            return Err(FormError::Incomplete);
        };
        if self.date.trim().is_empty() || self.service.trim().is_empty() {
            return Err(FormError::Incomplete);
        }

        self.phase = FormPhase::Submitting;
        Ok(NewReservation {
            shop_id,
            date: self.date.clone(),
            service: self.service.clone(),
        })
    }

    /// The write succeeded: clear every field and return to `Idle`.
    pub fn submit_succeeded(&mut self) {
        *self = Self::new();
    }

    /// The write failed: keep the user's input, return to `ShopSelected`.
    pub const fn submit_failed(&mut self) {
        self.phase = FormPhase::ShopSelected;
    }
}

/// Log of consumed submission tokens.
///
/// Every rendered form carries a fresh token, and the first submit carrying
/// it consumes it. A double-click or replayed POST arrives with a token that
/// is already spent and is refused, so at most one reservation is written per
/// rendered form.
#[derive(Debug, Clone, Default)]
pub struct SubmissionLog {
    consumed: Arc<Mutex<HashSet<String>>>,
}

impl SubmissionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token for a freshly rendered form.
    #[must_use]
    pub fn issue(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Spend a token.
    ///
    /// # Errors
    ///
    /// [`FormError::InFlight`] when the token was already spent by an
    /// earlier submit.
    pub fn consume(&self, token: &str) -> Result<(), FormError> {
        let mut consumed = self
            .consumed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if consumed.insert(token.to_string()) {
            Ok(())
        } else {
            Err(FormError::InFlight)
        }
    }
}
