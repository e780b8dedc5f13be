//! End-to-end booking flow tests over the real router.
//!
//! These exercise the observable contract of the booking page: directory
//! rendering, silent fetch failure, missing-field validation, the exact
//! wire shape of the reservation write, reset-on-success, and
//! retain-on-failure.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use legion_booking_core::ShopId;
use legion_booking_integration_tests::{FakeStore, test_app};
use legion_booking_storefront::store::{NewReservation, Shop};

fn sample_shops() -> Vec<Shop> {
    vec![
        Shop {
            id: ShopId::new(1),
            name: "Legión Centro".to_string(),
            location: "Av. Principal".to_string(),
        },
        Shop {
            id: ShopId::new(2),
            name: "Legión Norte".to_string(),
            location: "Calle 42".to_string(),
        },
    ]
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_form(app: &Router, body: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/reservas")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn health_is_ok() {
    let app = test_app(FakeStore::default());
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn directory_renders_every_shop() {
    let app = test_app(FakeStore::with_shops(sample_shops()));
    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Legión Centro"));
    assert!(body.contains("Av. Principal"));
    assert!(body.contains("Legión Norte"));
    assert!(body.contains("Calle 42"));
    // One select action per shop, nothing more
    assert_eq!(body.matches("Seleccionar").count(), 2);
    // Store order is preserved, no client-side sort
    let centro = body.find("Legión Centro").unwrap();
    let norte = body.find("Legión Norte").unwrap();
    assert!(centro < norte);
}

#[tokio::test]
async fn directory_fetch_failure_renders_empty_list_silently() {
    let app = test_app(FakeStore::failing_fetch());
    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Barberías Registradas"));
    assert_eq!(body.matches("Seleccionar").count(), 0);
    // No user-facing error surface on the read path
    assert!(!body.contains("class=\"notice"));
}

#[tokio::test]
async fn selecting_a_shop_reveals_the_form() {
    let app = test_app(FakeStore::with_shops(sample_shops()));

    let (_, without_selection) = get(&app, "/").await;
    assert!(!without_selection.contains("Confirmar Reserva"));

    let (_, with_selection) = get(&app, "/?mode=styled&barberia=2").await;
    assert!(with_selection.contains("Confirmar Reserva"));
    assert!(with_selection.contains("Reserva tu cita"));
    // Every rendered form carries a fresh submission token
    assert!(with_selection.contains("name=\"token\""));
}

#[tokio::test]
async fn missing_date_never_reaches_the_store() {
    let store = FakeStore::with_shops(sample_shops());
    let app = test_app(store.clone());

    let response = post_form(&app, "mode=styled&barberia_id=1&fecha=&servicio=Classic+Cut").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let target = location(&response);
    assert!(target.contains("notice=incomplete"));
    // The user's partial input is kept for the prompt
    assert!(target.contains("barberia=1"));
    assert!(store.inserted().is_empty());

    let (_, body) = get(&app, &target).await;
    assert!(body.contains("Por favor, selecciona una barbería, fecha y servicio."));
}

#[tokio::test]
async fn missing_shop_never_reaches_the_store() {
    let store = FakeStore::with_shops(sample_shops());
    let app = test_app(store.clone());

    let response = post_form(&app, "mode=styled&fecha=2024-05-01&servicio=Classic+Cut").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).contains("notice=incomplete"));
    assert!(store.inserted().is_empty());
}

#[tokio::test]
async fn empty_shop_field_prompts_like_an_absent_one() {
    let store = FakeStore::with_shops(sample_shops());
    let app = test_app(store.clone());

    // Browsers send `barberia_id=` for an unselected shop
    let response =
        post_form(&app, "mode=styled&barberia_id=&fecha=2024-05-01&servicio=Classic+Cut").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).contains("notice=incomplete"));
    assert!(store.inserted().is_empty());

    // The page side tolerates the same shape
    let (status, body) = get(&app, "/?mode=styled&barberia=").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("Confirmar Reserva"));
}

#[tokio::test]
async fn complete_submission_writes_exactly_once() {
    let store = FakeStore::with_shops(sample_shops());
    let app = test_app(store.clone());

    let response =
        post_form(&app, "mode=styled&barberia_id=1&fecha=2024-05-01&servicio=Classic+Cut").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert_eq!(
        store.inserted(),
        vec![NewReservation {
            shop_id: ShopId::new(1),
            date: "2024-05-01".to_string(),
            service: "Classic Cut".to_string(),
        }]
    );
}

#[tokio::test]
async fn resubmitting_a_spent_token_writes_only_once() {
    let store = FakeStore::with_shops(sample_shops());
    let app = test_app(store.clone());

    let body =
        "mode=styled&barberia_id=1&fecha=2024-05-01&servicio=Classic+Cut&token=form-token-1";
    let first = post_form(&app, body).await;
    assert!(location(&first).contains("notice=created"));

    // A double-click or replayed POST carries the same token
    let second = post_form(&app, body).await;
    assert_eq!(second.status(), StatusCode::SEE_OTHER);
    let target = location(&second);
    assert!(target.contains("notice=duplicate"));
    assert!(target.contains("barberia=1"));

    assert_eq!(store.inserted().len(), 1);

    let (_, page) = get(&app, &target).await;
    assert!(page.contains("Esta reserva ya fue enviada."));
}

#[tokio::test]
async fn success_resets_the_form() {
    let store = FakeStore::with_shops(sample_shops());
    let app = test_app(store.clone());

    let response =
        post_form(&app, "mode=styled&barberia_id=1&fecha=2024-05-01&servicio=Classic+Cut").await;

    // Redirect carries only the notice: no shop, date, or service left over
    let target = location(&response);
    assert_eq!(target, "/?mode=styled&notice=created");

    let (_, body) = get(&app, &target).await;
    assert!(body.contains("Reserva creada exitosamente"));
    assert!(!body.contains("Confirmar Reserva"));
}

#[tokio::test]
async fn failed_write_keeps_fields_and_shows_failure_notice() {
    let store = FakeStore::failing_insert(sample_shops());
    let app = test_app(store.clone());

    let response =
        post_form(&app, "mode=styled&barberia_id=1&fecha=2024-05-01&servicio=Classic+Cut").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let target = location(&response);
    assert!(target.contains("notice=failed"));
    assert!(target.contains("barberia=1"));
    assert!(target.contains("fecha=2024-05-01"));
    assert!(target.contains("servicio=Classic%20Cut"));
    assert!(!target.contains("created"));
    assert!(store.inserted().is_empty());

    let (_, body) = get(&app, &target).await;
    assert!(body.contains("No se pudo crear la reserva"));
    assert!(!body.contains("Reserva creada exitosamente"));
    // Prior values are still in the form
    assert!(body.contains("value=\"2024-05-01\""));
    assert!(body.contains("Confirmar Reserva"));
}

#[tokio::test]
async fn plain_mode_uses_free_text_service_field() {
    let app = test_app(FakeStore::with_shops(sample_shops()));
    let (_, body) = get(&app, "/?mode=plain&barberia=1").await;

    assert!(body.contains("type=\"text\""));
    assert!(!body.contains("<select"));
    // Plain variant skips the styled chrome entirely
    assert!(!body.contains("<style>"));
}

#[tokio::test]
async fn styled_mode_offers_the_fixed_service_menu() {
    let app = test_app(FakeStore::with_shops(sample_shops()));
    let (_, body) = get(&app, "/?barberia=1").await;

    assert!(body.contains("<select"));
    for label in ["Classic Cut", "Beard Trim", "Cut+Beard Combo", "Color &amp; Style"] {
        assert!(body.contains(label), "missing service option: {label}");
    }
}
