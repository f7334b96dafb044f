/// Integration tests for the HTML pages and service endpoints

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::TestContext;
use littlelemon_shared::models::{booking::NewBooking, menu_item::NewMenuItem};
use chrono::NaiveDate;

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_static_pages_render() {
    let ctx = TestContext::new();

    for uri in ["/", "/home/", "/about/", "/book/"] {
        let (status, body) = ctx.send(get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(body.contains("Little Lemon"), "{}", uri);
    }
}

#[tokio::test]
async fn test_menu_page_lists_items() {
    let ctx = TestContext::new();
    let item = ctx
        .state
        .menu
        .create(NewMenuItem {
            name: "IceCream".to_string(),
            price: 80,
            description: "Delicious".to_string(),
        })
        .await
        .unwrap();

    let (status, body) = ctx.send(get("/menu-page/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("IceCream"));
    assert!(body.contains(&format!("/menu_item/{}/", item.id)));

    let (status, body) = ctx.send(get(&format!("/menu_item/{}/", item.id))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Delicious"));
}

#[tokio::test]
async fn test_missing_menu_item_page() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send(get("/menu_item/12/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Menu item 12 not found"));
}

#[tokio::test]
async fn test_pages_escape_user_content() {
    let ctx = TestContext::new();
    ctx.state
        .menu
        .create(NewMenuItem {
            name: "<script>alert(1)</script>".to_string(),
            price: 1,
            description: String::new(),
        })
        .await
        .unwrap();

    let (_, body) = ctx.send(get("/menu-page/")).await;
    assert!(!body.contains("<script>alert(1)</script>"));
}

#[tokio::test]
async fn test_book_form_submission() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(form_post(
            "/book/",
            "first_name=Alice&reservation_date=2024-05-01&reservation_slot=3",
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("your table is booked"));

    let (status, body) = ctx
        .send(form_post(
            "/book/",
            "first_name=Bob&reservation_date=2024-05-01&reservation_slot=3",
        ))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("already booked"));
    assert!(body.contains("value=\"Bob\""));

    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let bookings = ctx.state.bookings.list_by_date(date).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].first_name, "Alice");
}

#[tokio::test]
async fn test_book_form_invalid_input() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(form_post(
            "/book/",
            "first_name=Alice&reservation_date=soon&reservation_slot=3",
        ))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("reservation_date"));
    assert!(ctx.state.bookings.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reservations_page() {
    let ctx = TestContext::new();
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    ctx.state
        .bookings
        .insert(NewBooking {
            first_name: "Alice".to_string(),
            reservation_date: date,
            reservation_slot: 3,
        })
        .await
        .unwrap();

    let (status, body) = ctx.send(get("/reservations/?date=2024-05-01")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Alice"));
    assert!(body.contains("2024-05-01"));

    let (_, body) = ctx.send(get("/reservations/?date=2024-05-02")).await;
    assert!(body.contains("No bookings on this date"));
}

#[tokio::test]
async fn test_health_reports_in_memory_storage() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "in-memory");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_security_headers_on_pages() {
    let ctx = TestContext::new();

    let response = {
        use tower::ServiceExt;
        ctx.app.clone().oneshot(get("/home/")).await.unwrap()
    };
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
    assert!(response.headers().get("content-security-policy").is_some());
}

#[tokio::test]
async fn test_reservations_page_blank_date_means_today() {
    let ctx = TestContext::new();
    let today = chrono::Local::now().date_naive();
    ctx.state
        .bookings
        .insert(NewBooking {
            first_name: "Alice".to_string(),
            reservation_date: today,
            reservation_slot: 3,
        })
        .await
        .unwrap();

    let (status, body) = ctx.send(get("/reservations/?date=")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&format!("Reservations for {}", today)));
    assert!(body.contains("Alice"));
}
