//! Session cart on the menu page.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use campus_eats_integration_tests::TestApp;

async fn add(app: &mut TestApp, canteen_id: &str, name: &str) {
    let resp = app
        .post_form("/cart/add", &[("canteenId", canteen_id), ("name", name)])
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some(format!("/menu/{canteen_id}").as_str()));
}

#[tokio::test]
async fn test_add_items_updates_summary_and_tokens() {
    let mut app = TestApp::new();

    add(&mut app, "1", "Veg Fried Rice").await;
    add(&mut app, "1", "Veg Fried Rice").await;
    add(&mut app, "1", "Gobi Manchurian").await;

    let menu = app.get("/menu/1").await;
    assert!(menu.body.contains("3 item(s) in cart. Total: ₹350.00"));
    assert_eq!(menu.body.matches(r#"value="Veg Fried Rice|120""#).count(), 2);
    assert_eq!(menu.body.matches(r#"value="Gobi Manchurian|110""#).count(), 1);
}

#[tokio::test]
async fn test_remove_decrements_and_drops_line() {
    let mut app = TestApp::new();

    add(&mut app, "1", "Veg Fried Rice").await;
    add(&mut app, "1", "Gobi Manchurian").await;

    let resp = app
        .post_form("/cart/remove", &[("canteenId", "1"), ("name", "Gobi Manchurian")])
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);

    let menu = app.get("/menu/1").await;
    assert!(menu.body.contains("1 item(s) in cart. Total: ₹120.00"));
    assert!(!menu.body.contains("Gobi Manchurian|110"));

    // Removing what is not there changes nothing.
    app.post_form("/cart/remove", &[("canteenId", "1"), ("name", "Gobi Manchurian")])
        .await;
    app.post_form("/cart/remove", &[("canteenId", "1"), ("name", "Veg Fried Rice")])
        .await;
    let menu = app.get("/menu/1").await;
    assert!(menu.body.contains("No items added yet."));
}

#[tokio::test]
async fn test_cart_belongs_to_one_canteen() {
    let mut app = TestApp::new();

    add(&mut app, "1", "Veg Fried Rice").await;
    add(&mut app, "4", "Cold Coffee").await;

    let java = app.get("/menu/4").await;
    assert!(java.body.contains("1 item(s) in cart. Total: ₹100.00"));

    let sjt = app.get("/menu/1").await;
    assert!(sjt.body.contains("No items added yet."));
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let mut alice = TestApp::new();
    let mut bob = alice.new_visitor();

    add(&mut alice, "1", "Veg Fried Rice").await;

    let menu = bob.get("/menu/1").await;
    assert!(menu.body.contains("No items added yet."));
}

#[tokio::test]
async fn test_cart_rejects_unknown_canteen_and_item() {
    let mut app = TestApp::new();

    let resp = app
        .post_form("/cart/add", &[("canteenId", "999"), ("name", "Veg Fried Rice")])
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = app
        .post_form("/cart/add", &[("canteenId", "1"), ("name", "Caviar")])
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}
