//! Form checkout and the structured checkout API.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use campus_eats_integration_tests::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_checkout_aggregates_repeated_tokens() {
    let mut app = TestApp::new();
    let resp = app
        .post_form(
            "/checkout",
            &[
                ("canteenName", "SJT Canteen"),
                ("items", "Veg Fried Rice|120"),
                ("items", "Veg Fried Rice|120"),
                ("items", "Gobi Manchurian|110"),
            ],
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let body = &resp.body;
    assert!(body.contains("SJT Canteen Order"));
    assert!(body.contains("<td>Veg Fried Rice</td>"));
    assert!(body.contains("<td>2</td>"));
    assert!(body.contains("₹240.00"));
    assert!(body.contains("3 item(s)"));
    assert!(body.contains("₹350.00"));

    // First appearance order
    let rice = body.find("Veg Fried Rice").unwrap();
    let gobi = body.find("Gobi Manchurian").unwrap();
    assert!(rice < gobi);

    // Payment choices
    assert!(body.contains(r#"value="cod""#));
    assert!(body.contains(r#"value="upi""#));
    assert!(body.contains(r#"value="card""#));
}

#[tokio::test]
async fn test_checkout_without_items_renders_empty_state() {
    let mut app = TestApp::new();
    let resp = app.post_form("/checkout", &[]).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Your Order"));
    assert!(resp.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_checkout_keeps_delimiter_inside_names() {
    let mut app = TestApp::new();
    let resp = app
        .post_form("/checkout", &[("items", "Tea|Coffee Combo|45")])
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("<td>Tea|Coffee Combo</td>"));
    assert!(resp.body.contains("₹45.00"));
}

#[tokio::test]
async fn test_checkout_rejects_malformed_tokens() {
    let mut app = TestApp::new();

    for token in ["Veg Fried Rice", "|120", "Veg Fried Rice|cheap", "Veg Fried Rice|-5"] {
        let resp = app.post_form("/checkout", &[("items", token)]).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{token}");
    }
}

#[tokio::test]
async fn test_menu_form_round_trips_through_checkout() {
    let mut app = TestApp::new();
    for _ in 0..3 {
        app.post_form("/cart/add", &[("canteenId", "2"), ("name", "Chicken Puff")])
            .await;
    }

    let menu = app.get("/menu/2").await;
    let tokens = menu.body.matches(r#"name="items" value="Chicken Puff|50""#).count();
    assert_eq!(tokens, 3);

    let mut fields = vec![("canteenName", "Darling Bakery")];
    fields.extend(std::iter::repeat_n(("items", "Chicken Puff|50"), tokens));
    let resp = app.post_form("/checkout", &fields).await;

    assert!(resp.body.contains("Darling Bakery Order"));
    assert!(resp.body.contains("<td>3</td>"));
    assert!(resp.body.contains("₹150.00"));
}

#[tokio::test]
async fn test_api_checkout_prices_from_catalog() {
    let mut app = TestApp::new();
    let resp = app
        .post_json(
            "/api/checkout",
            &json!({
                "canteenId": 1,
                "lines": [
                    { "name": "Veg Fried Rice", "quantity": 1 },
                    { "name": "Gobi Manchurian", "quantity": 1 },
                    { "name": "Veg Fried Rice", "quantity": 1 }
                ]
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["canteenName"], "SJT Canteen");
    assert_eq!(body["itemCount"], 3);
    assert_eq!(body["subtotal"], "350");

    let lines = body["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["name"], "Veg Fried Rice");
    assert_eq!(lines[0]["price"], "120");
    assert_eq!(lines[0]["quantity"], 2);
    assert_eq!(lines[0]["lineTotal"], "240");
    assert_eq!(lines[1]["name"], "Gobi Manchurian");
}

#[tokio::test]
async fn test_api_checkout_rejects_bad_requests() {
    let mut app = TestApp::new();

    let resp = app
        .post_json("/api/checkout", &json!({ "canteenId": 999, "lines": [] }))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = app
        .post_json(
            "/api/checkout",
            &json!({ "canteenId": 1, "lines": [{ "name": "Caviar", "quantity": 1 }] }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = app
        .post_json(
            "/api/checkout",
            &json!({ "canteenId": 1, "lines": [{ "name": "Veg Fried Rice", "quantity": 0 }] }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_checkout_rejects_totals_too_large_to_represent() {
    let mut app = TestApp::new();
    let huge = "X|79228162514264337593543950335";

    let resp = app
        .post_form("/checkout", &[("items", huge), ("items", huge)])
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.contains("too large"));

    // The server keeps serving afterwards.
    let resp = app.post_form("/checkout", &[("items", huge)]).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("1 item(s)"));
}

#[tokio::test]
async fn test_api_checkout_rejects_quantities_that_overflow() {
    let mut app = TestApp::new();

    let resp = app
        .post_json(
            "/api/checkout",
            &json!({
                "canteenId": 1,
                "lines": [
                    { "name": "Veg Fried Rice", "quantity": u32::MAX },
                    { "name": "Gobi Manchurian", "quantity": 1 }
                ]
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = app
        .post_json(
            "/api/checkout",
            &json!({
                "canteenId": 1,
                "lines": [
                    { "name": "Veg Fried Rice", "quantity": u32::MAX },
                    { "name": "Veg Fried Rice", "quantity": 1 }
                ]
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.contains("Veg Fried Rice"));
}

#[tokio::test]
async fn test_api_checkout_accepts_large_quantities_that_fit() {
    let mut app = TestApp::new();
    let resp = app
        .post_json(
            "/api/checkout",
            &json!({
                "canteenId": 1,
                "lines": [{ "name": "Veg Fried Rice", "quantity": u32::MAX }]
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["itemCount"], u32::MAX);
    assert_eq!(body["subtotal"], "515396075400");
}
