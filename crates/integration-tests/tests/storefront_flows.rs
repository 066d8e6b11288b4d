//! End-to-end shopper flows through the storefront router.
//!
//! Each test builds its own in-memory storefront, so sessions never leak
//! between tests.

use axum::http::StatusCode;
use luxury_core::NavTarget;
use luxury_integration_tests::{TestApp, TestClient};

/// Shopper on a fresh storefront.
fn shopper() -> TestClient {
    TestApp::new().client()
}

/// Formatted like the storefront does, with a non-breaking group separator.
fn rub(amount: &str) -> String {
    format!("{} ₽", amount.replace(' ', "\u{a0}"))
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_health() {
    let mut client = shopper();
    let resp = client.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_home_renders_featured_products() {
    let mut client = shopper();
    let resp = client.get("/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Classic Leather Bag"));
    assert!(resp.body.contains("Swiss Premium Watch"));
    assert!(resp.body.contains("Diamond Necklace"));
    assert!(!resp.body.contains("Elegant Bracelet"));
    assert!(resp.body.contains(&rub("89 900")));
    assert!(resp.body.contains("-25%"));
}

#[tokio::test]
async fn test_every_menu_page_renders() {
    let mut client = shopper();
    for target in NavTarget::ALL {
        let (path, title) = (target.path(), target.label());
        let resp = client.get(path).await;
        assert_eq!(resp.status, StatusCode::OK, "{path}");
        assert!(resp.body.contains(title), "{path} should mention {title}");
        assert!(
            resp.body.contains(&format!("href=\"{path}\" class=\"is-active\"")),
            "{path} should be the active menu entry"
        );
    }
}

#[tokio::test]
async fn test_response_headers() {
    let mut client = shopper();
    let resp = client.get("/").await;

    assert!(resp.headers.contains_key("x-request-id"));
    assert_eq!(resp.headers["x-frame-options"], "DENY");
    assert_eq!(resp.headers["x-content-type-options"], "nosniff");
    assert!(resp.headers.contains_key("content-security-policy"));
    assert_eq!(resp.headers["cache-control"], "no-store");
}

// ============================================================================
// Catalog & Products
// ============================================================================

#[tokio::test]
async fn test_catalog_filter_is_remembered() {
    let mut client = shopper();

    let resp = client.get("/catalog?category=Bags").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Classic Leather Bag"));
    assert!(resp.body.contains("Italian Briefcase"));
    assert!(!resp.body.contains("Swiss Premium Watch"));

    // Leave and come back without a query
    client.get("/about").await;
    let resp = client.get("/catalog").await;
    assert!(resp.body.contains("Italian Briefcase"));
    assert!(!resp.body.contains("Diamond Necklace"));

    let resp = client.get("/catalog?category=All").await;
    assert!(resp.body.contains("Diamond Necklace"));
    assert!(resp.body.contains("Elegant Bracelet"));
}

#[tokio::test]
async fn test_catalog_unknown_category_is_empty() {
    let mut client = shopper();
    let resp = client.get("/catalog?category=Shoes").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("No products in this category."));
}

#[tokio::test]
async fn test_product_opens_with_first_variant() {
    let mut client = shopper();
    let resp = client.get("/products/2").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Swiss Premium Watch"));
    assert!(resp.body.contains("Color: Silver"));
    assert!(resp.body.contains("Size: 40mm"));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let mut client = shopper();
    assert_eq!(client.get("/products/999").await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        client
            .post_form("/cart/add", &[("product_id", "999")])
            .await
            .status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        client
            .post_form("/favorites/toggle", &[("product_id", "999")])
            .await
            .status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_selection_survives_reload_and_feeds_cart() {
    let mut client = shopper();
    client.get("/products/2").await;

    let resp = client
        .post_form("/products/2/select", &[("color", "Gold")])
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/products/2"));

    client
        .post_form("/products/2/select", &[("size", "44mm")])
        .await;
    let resp = client.get("/products/2").await;
    assert!(resp.body.contains("Color: Gold"));
    assert!(resp.body.contains("Size: 44mm"));
    assert!(!resp.body.contains("cart-overlay"));

    // No variant in the form: the page selection applies
    client.post_form("/cart/add", &[("product_id", "2")]).await;
    let resp = client.get("/cart").await;
    assert!(resp.body.contains("Gold / 44mm"));
}

#[tokio::test]
async fn test_unknown_color_is_rejected() {
    let mut client = shopper();
    client.get("/products/1").await;

    let resp = client
        .post_form("/products/1/select", &[("color", "Purple")])
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = client.get("/products/1").await;
    assert!(resp.body.contains("Color: Black"));
}

#[tokio::test]
async fn test_rejected_size_keeps_color_unchanged() {
    let mut client = shopper();
    client.get("/products/2").await;

    let resp = client
        .post_form("/products/2/select", &[("color", "Gold"), ("size", "99mm")])
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = client.get("/products/2").await;
    assert!(resp.body.contains("Color: Silver"));
    assert!(resp.body.contains("Size: 40mm"));

    // Both valid: both apply
    client
        .post_form("/products/2/select", &[("color", "Gold"), ("size", "42mm")])
        .await;
    let resp = client.get("/products/2").await;
    assert!(resp.body.contains("Color: Gold"));
    assert!(resp.body.contains("Size: 42mm"));
}

#[tokio::test]
async fn test_out_of_stock_cannot_be_added() {
    let mut client = TestApp::with_catalog("sold_out_catalog.json").client();

    let resp = client.get("/products/7").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Vintage Travel Trunk"));

    let resp = client.post_form("/cart/add", &[("product_id", "7")]).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(client.get("/cart").await.body.contains("Your cart is empty."));

    let resp = client.post_form("/cart/add", &[("product_id", "1")]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_empty_cart_message() {
    let mut client = shopper();
    let resp = client.get("/cart").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_add_to_cart_shows_line_and_total() {
    let mut client = shopper();

    let resp = client.post_form("/cart/add", &[("product_id", "1")]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/"));

    client.post_form("/cart/add", &[("product_id", "1")]).await;
    client.post_form("/cart/add", &[("product_id", "5")]).await;

    let resp = client.get("/cart").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Classic Leather Bag"));
    assert!(resp.body.contains("Black / One Size"));
    assert!(resp.body.contains("Designer Cufflinks"));
    assert!(resp.body.contains(&rub("179 800")));
    assert!(resp.body.contains(&format!("Total: <span class=\"price\">{}</span>", rub("229 700"))));

    let resp = client.get("/cart/count").await;
    assert!(resp.body.contains(">2<"));
}

#[tokio::test]
async fn test_colors_make_separate_lines() {
    let mut client = shopper();
    client
        .post_form("/cart/add", &[("product_id", "1"), ("color", "Black")])
        .await;
    client
        .post_form("/cart/add", &[("product_id", "1"), ("color", "Brown")])
        .await;

    let resp = client.get("/cart").await;
    assert!(resp.body.contains("Black / One Size"));
    assert!(resp.body.contains("Brown / One Size"));
    assert!(resp.body.contains(&rub("179 800")));
}

#[tokio::test]
async fn test_quantity_never_drops_below_one() {
    let mut client = shopper();
    client.post_form("/cart/add", &[("product_id", "5")]).await;

    let resp = client
        .post_form("/cart/update", &[("index", "0"), ("delta", "-5")])
        .await;
    assert_eq!(resp.location(), Some("/"));

    let resp = client.get("/cart").await;
    assert!(resp.body.contains("<span class=\"quantity\">1</span>"));
    assert!(resp.body.contains(&rub("49 900")));

    client
        .post_form("/cart/update", &[("index", "0"), ("delta", "1")])
        .await;
    let resp = client.get("/cart").await;
    assert!(resp.body.contains("<span class=\"quantity\">2</span>"));
    assert!(resp.body.contains(&rub("99 800")));
}

#[tokio::test]
async fn test_remove_line() {
    let mut client = shopper();
    client.post_form("/cart/add", &[("product_id", "3")]).await;

    // Out of range is ignored
    let resp = client.post_form("/cart/remove", &[("index", "7")]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert!(client.get("/cart").await.body.contains("Diamond Necklace"));

    client.post_form("/cart/remove", &[("index", "0")]).await;
    let resp = client.get("/cart").await;
    assert!(resp.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_close_cart_returns_to_current_page() {
    let mut client = shopper();
    client.post_form("/cart/add", &[("product_id", "3")]).await;
    client.get("/delivery").await;
    client.get("/cart").await;

    let resp = client.post_form("/cart/close", &[]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/delivery"));
}

#[tokio::test]
async fn test_drawer_opens_over_current_page() {
    let mut client = shopper();
    client.get("/products/2").await;
    client.post_form("/products/2/select", &[("color", "Gold")]).await;

    let resp = client.post_form("/cart/add", &[("product_id", "2")]).await;
    assert_eq!(resp.location(), Some("/products/2"));

    let resp = client.get("/products/2").await;
    assert!(resp.body.contains("Color: Gold"));
    assert!(resp.body.contains("cart-overlay"));
    assert!(resp.body.contains("Gold / 40mm"));
    assert!(resp.body.contains(&format!("Total: <span class=\"price\">{}</span>", rub("349 900"))));

    // Stays open while browsing, until closed
    assert!(client.get("/about").await.body.contains("cart-overlay"));
    let resp = client.post_form("/cart/close", &[]).await;
    assert_eq!(resp.location(), Some("/about"));
    let resp = client.get("/about").await;
    assert!(!resp.body.contains("cart-overlay"));
    assert!(resp.body.contains(">1<"));
}

#[tokio::test]
async fn test_cart_page_has_no_drawer_on_top() {
    let mut client = shopper();
    client.post_form("/cart/add", &[("product_id", "1")]).await;
    let resp = client.get("/cart").await;
    assert!(resp.body.contains("Classic Leather Bag"));
    assert!(!resp.body.contains("cart-overlay"));
}

// ============================================================================
// Favorites
// ============================================================================

#[tokio::test]
async fn test_favorites_round_trip() {
    let mut client = shopper();

    let resp = client.get("/favorites").await;
    assert!(resp.body.contains("You have no favorites yet."));

    let resp = client
        .post_form("/favorites/toggle", &[("product_id", "3")])
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/favorites"));

    let resp = client.get("/favorites").await;
    assert!(resp.body.contains("Diamond Necklace"));
    assert!(resp.body.contains("aria-pressed=\"true\""));

    client
        .post_form("/favorites/toggle", &[("product_id", "3")])
        .await;
    let resp = client.get("/favorites").await;
    assert!(resp.body.contains("You have no favorites yet."));
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_browsing_alone_creates_no_session() {
    let mut client = shopper();
    for target in NavTarget::ALL {
        client.get(target.path()).await;
    }
    client.get("/products/2").await;
    client.get("/cart").await;
    assert!(!client.has_session());

    client.post_form("/favorites/toggle", &[("product_id", "2")]).await;
    assert!(client.has_session());

    // Once there is a session, the current page is remembered
    client.get("/news").await;
    let resp = client.post_form("/cart/add", &[("product_id", "2")]).await;
    assert_eq!(resp.location(), Some("/news"));
}

#[tokio::test]
async fn test_rejected_action_creates_no_session() {
    let mut client = shopper();
    let resp = client.post_form("/cart/add", &[("product_id", "999")]).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(!client.has_session());
}

#[tokio::test]
async fn test_shoppers_do_not_share_carts() {
    let app = TestApp::new();
    let mut alice = app.client();
    let mut bob = app.client();

    alice.post_form("/cart/add", &[("product_id", "2")]).await;
    bob.get("/").await;

    assert!(alice.get("/cart").await.body.contains("Swiss Premium Watch"));
    let resp = bob.get("/cart").await;
    assert!(resp.body.contains("Your cart is empty."));
    assert!(!resp.body.contains("Swiss Premium Watch"));
}
