//! Browsing: universities, canteens and menus.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use campus_eats_integration_tests::TestApp;

#[tokio::test]
async fn test_home_lists_universities() {
    let mut app = TestApp::new();
    let resp = app.get("/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Vellore Institute of Technology"));
    assert!(resp.body.contains("BITS Pilani"));
    assert!(resp.body.contains("/canteens?university=IIT%20Madras"));
    assert!(resp.body.contains("Login"));
}

#[tokio::test]
async fn test_canteens_match_university_case_insensitively() {
    let mut app = TestApp::new();
    let resp = app
        .get("/canteens?university=%20vellore%20INSTITUTE%20of%20technology%20")
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("SJT Canteen"));
    assert!(resp.body.contains("Darling Bakery"));
    assert!(resp.body.contains("/menu/1"));
    assert!(!resp.body.contains("Java"));
}

#[tokio::test]
async fn test_canteens_for_university_without_canteens() {
    let mut app = TestApp::new();
    let resp = app.get("/canteens?university=Delhi%20University").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("No canteens found"));
}

#[tokio::test]
async fn test_canteens_without_university_redirects_home() {
    let mut app = TestApp::new();

    let resp = app.get("/canteens").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/"));

    let resp = app.get("/canteens?university=%20%20").await;
    assert_eq!(resp.location(), Some("/"));
}

#[tokio::test]
async fn test_menu_renders_items_and_empty_cart() {
    let mut app = TestApp::new();
    let resp = app.get("/menu/1").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("SJT Canteen"));
    assert!(resp.body.contains("Veg Fried Rice"));
    assert!(resp.body.contains("₹120.00"));
    assert!(resp.body.contains("No items added yet."));
}

#[tokio::test]
async fn test_unknown_canteen_is_not_found() {
    let mut app = TestApp::new();

    assert_eq!(app.get("/menu/999").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/menu/abc").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_pages() {
    let mut app = TestApp::new();

    for path in ["/help", "/deliverers", "/add-canteen"] {
        let resp = app.get(path).await;
        assert_eq!(resp.status, StatusCode::OK, "{path}");
        assert!(resp.body.contains("Campus Eats"), "{path}");
    }
}

#[tokio::test]
async fn test_health_and_request_id() {
    let mut app = TestApp::new();

    let resp = app.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
    assert!(resp.headers.contains_key("x-request-id"));

    // No database configured: ready as soon as the process is up.
    assert_eq!(app.get("/health/ready").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_stylesheet_is_served() {
    let mut app = TestApp::new();
    let resp = app.get("/static/css/main.css").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(".site-header"));
}
