//! Booking page and reservation submit handlers.
//!
//! One page serves both presentation variants behind `?mode=plain|styled`.
//! The directory load is silent on failure (empty list, diagnostic log
//! only); the write path surfaces both outcomes to the user - the success
//! notice from the original page, plus a symmetric failure notice in place
//! of its silently logged error.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use legion_booking_core::{ServiceKind, ShopId};

use crate::form::BookingForm;
use crate::state::AppState;
use crate::store::{Shop, ShopStore};

// =============================================================================
// Page Parameters
// =============================================================================

/// Presentation variant of the booking page.
///
/// Behavior is identical in both; `Styled` adds page chrome and offers the
/// fixed service menu instead of a free-text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageMode {
    Plain,
    #[default]
    Styled,
}

impl PageMode {
    /// Query-string value for this mode.
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Styled => "styled",
        }
    }
}

/// Outcome notice carried through the submit redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// The reservation was written to the store.
    Created,
    /// One of shop, date, and service was missing; nothing was submitted.
    Incomplete,
    /// The store rejected or failed the write.
    Failed,
    /// A resubmit carried an already-spent token; no second write was issued.
    Duplicate,
}

impl Notice {
    /// Query-string value for this notice.
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Incomplete => "incomplete",
            Self::Failed => "failed",
            Self::Duplicate => "duplicate",
        }
    }

    /// User-facing message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Created => "Reserva creada exitosamente",
            Self::Incomplete => "Por favor, selecciona una barbería, fecha y servicio.",
            Self::Failed => "No se pudo crear la reserva. Inténtalo de nuevo.",
            Self::Duplicate => "Esta reserva ya fue enviada.",
        }
    }

    /// CSS class for the notice banner.
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::Created => "success",
            Self::Incomplete | Self::Duplicate => "prompt",
            Self::Failed => "error",
        }
    }
}

/// Query parameters of the booking page.
#[derive(Debug, Deserialize)]
pub struct BookingQuery {
    #[serde(default)]
    pub mode: PageMode,
    #[serde(default, deserialize_with = "empty_shop_as_none")]
    pub barberia: Option<ShopId>,
    pub fecha: Option<String>,
    pub servicio: Option<String>,
    pub notice: Option<Notice>,
}

/// Reservation form data.
#[derive(Debug, Deserialize)]
pub struct ReserveForm {
    #[serde(default)]
    pub mode: PageMode,
    #[serde(default, deserialize_with = "empty_shop_as_none")]
    pub barberia_id: Option<ShopId>,
    #[serde(default)]
    pub fecha: String,
    #[serde(default)]
    pub servicio: String,
    /// Single-use token issued with the rendered form.
    #[serde(default)]
    pub token: Option<String>,
}

/// Browsers submit `barberia_id=` when nothing is selected; fold the empty
/// value into the absent case so it prompts instead of failing extraction.
fn empty_shop_as_none<'de, D>(deserializer: D) -> Result<Option<ShopId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<i32>()
            .map(|id| Some(ShopId::new(id)))
            .map_err(serde::de::Error::custom),
    }
}

// =============================================================================
// Template
// =============================================================================

/// The selected shop, for the form header.
pub struct SelectedShop {
    pub id: ShopId,
    pub name: String,
}

/// Notice banner display data.
pub struct NoticeView {
    pub message: &'static str,
    pub kind: &'static str,
}

impl From<Notice> for NoticeView {
    fn from(notice: Notice) -> Self {
        Self {
            message: notice.message(),
            kind: notice.kind(),
        }
    }
}

/// Booking page template.
#[derive(Template, WebTemplate)]
#[template(path = "booking.html")]
pub struct BookingTemplate {
    /// Whether the styled variant is active.
    pub styled: bool,
    /// Mode to thread through links and the form.
    pub mode: PageMode,
    /// Shop directory, in store order.
    pub shops: Vec<Shop>,
    /// Selected shop; the form is only rendered when present.
    pub selected: Option<SelectedShop>,
    /// Date field value.
    pub fecha: String,
    /// Service field value.
    pub servicio: String,
    /// Service menu for the styled variant.
    pub services: [ServiceKind; 4],
    /// Single-use submission token for the rendered form.
    pub token: String,
    /// Outcome banner, if any.
    pub notice: Option<NoticeView>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the booking page.
///
/// Fetches the full shop directory on every render. A fetch failure renders
/// an empty directory and logs the error; no user-facing error is shown for
/// this path.
#[instrument(skip(state))]
pub async fn page<S: ShopStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<BookingQuery>,
) -> BookingTemplate {
    let shops = state.store().list_shops().await.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch shop directory: {e}");
        Vec::new()
    });

    let form = BookingForm::with_fields(
        query.barberia,
        query.fecha.unwrap_or_default(),
        query.servicio.unwrap_or_default(),
    );

    let selected = form.shop().map(|id| SelectedShop {
        id,
        name: shops
            .iter()
            .find(|shop| shop.id == id)
            .map_or_else(|| format!("Barbería #{id}"), |shop| shop.name.clone()),
    });

    BookingTemplate {
        styled: query.mode == PageMode::Styled,
        mode: query.mode,
        shops,
        selected,
        fecha: form.date().to_string(),
        servicio: form.service().to_string(),
        services: ServiceKind::ALL,
        token: state.submissions().issue(),
        notice: query.notice.map(NoticeView::from),
    }
}

/// Submit a reservation.
///
/// Drives the [`BookingForm`] state machine: an incomplete form never
/// reaches the store and redirects back with a prompt; a complete one spends
/// its submission token and issues exactly one insert. Success clears every
/// field, failure keeps them, and a resubmit of an already-spent token is
/// refused before the store is touched.
#[instrument(skip(state), fields(shop = ?form.barberia_id))]
pub async fn reserve<S: ShopStore>(
    State(state): State<AppState<S>>,
    Form(form): Form<ReserveForm>,
) -> Redirect {
    let mode = form.mode;
    let mut booking = BookingForm::with_fields(form.barberia_id, form.fecha, form.servicio);

    let Ok(reservation) = booking.begin_submit() else {
        // The one locally recovered condition: prompt the user, no error log.
        return Redirect::to(&booking_url(mode, &booking, Some(Notice::Incomplete)));
    };

    let duplicate = form
        .token
        .as_deref()
        .filter(|token| !token.is_empty())
        .is_some_and(|token| state.submissions().consume(token).is_err());
    if duplicate {
        booking.submit_failed();
        tracing::warn!("Refused resubmit carrying a spent booking token");
        return Redirect::to(&booking_url(mode, &booking, Some(Notice::Duplicate)));
    }

    match state.store().create_reservation(&reservation).await {
        Ok(()) => {
            booking.submit_succeeded();
            tracing::info!(shop = %reservation.shop_id, "Reservation created");
            Redirect::to(&booking_url(mode, &booking, Some(Notice::Created)))
        }
        Err(e) => {
            booking.submit_failed();
            tracing::error!("Failed to create reservation: {e}");
            Redirect::to(&booking_url(mode, &booking, Some(Notice::Failed)))
        }
    }
}

/// Build a booking page URL carrying the form state and an optional notice.
fn booking_url(mode: PageMode, form: &BookingForm, notice: Option<Notice>) -> String {
    let mut url = format!("/?mode={}", mode.as_query());
    if let Some(shop) = form.shop() {
        url.push_str(&format!("&barberia={shop}"));
    }
    if !form.date().is_empty() {
        url.push_str(&format!("&fecha={}", urlencoding::encode(form.date())));
    }
    if !form.service().is_empty() {
        url.push_str(&format!("&servicio={}", urlencoding::encode(form.service())));
    }
    if let Some(notice) = notice {
        url.push_str(&format!("&notice={}", notice.as_query()));
    }
    url
}
