//! HTTP route handlers for storefront.
//!
//! Every GET handler loads the shopper's state from the session, records the
//! page being viewed, and renders from [`ViewModel`]. POST handlers dispatch
//! one [`luxury_core::Action`] and redirect (POST/redirect/GET).
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured products)
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /catalog?category=..    - Product grid with category filter
//! GET  /products/{id}          - Product detail
//! POST /products/{id}/select   - Pick color and/or size
//!
//! # Favorites
//! GET  /favorites              - Favorite products
//! POST /favorites/toggle       - Add or remove a favorite
//!
//! # Cart
//! GET  /cart                   - Cart page (opens the drawer)
//! POST /cart/add               - Add to cart
//! POST /cart/update            - Change a line's quantity
//! POST /cart/remove            - Remove a line
//! POST /cart/close             - Close the drawer
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Content
//! GET  /about, /news, /delivery, /contacts, /faq
//! ```

pub mod cart;
pub mod catalog;
pub mod favorites;
pub mod home;
pub mod pages;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use luxury_core::{NavTarget, ProductCard, ProductId, ViewModel};

use crate::state::AppState;
use cart::CartView;

// =============================================================================
// Shared View Data
// =============================================================================

/// A menu link for the header.
#[derive(Clone)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

/// Data every page template needs for the header and the cart drawer.
#[derive(Clone)]
pub struct Layout {
    pub title: String,
    pub nav: Vec<NavLink>,
    pub cart_count: usize,
    /// Rendered over the page while the drawer is open.
    pub drawer: Option<CartView>,
}

impl Layout {
    /// Build the header for a page titled `title`.
    #[must_use]
    pub fn new(title: impl Into<String>, view: &ViewModel<'_>) -> Self {
        Self {
            title: title.into(),
            nav: view
                .nav
                .iter()
                .map(|item| NavLink {
                    label: item.target.label(),
                    path: item.target.path(),
                    active: item.active,
                })
                .collect(),
            cart_count: view.cart_count,
            drawer: view.cart_open.then(|| CartView::from(view)),
        }
    }
}

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub image: String,
    pub price: String,
    pub old_price: Option<String>,
    pub discount_percent: Option<u32>,
    pub is_favorite: bool,
    pub in_stock: bool,
}

impl From<&ProductCard<'_>> for ProductView {
    fn from(card: &ProductCard<'_>) -> Self {
        Self {
            id: card.product.id,
            name: card.product.name.clone(),
            category: card.product.category.clone(),
            image: card.product.image.clone(),
            price: card.price.display(),
            old_price: card.old_price.as_ref().map(luxury_core::Price::display),
            discount_percent: card.discount_percent,
            is_favorite: card.is_favorite,
            in_stock: card.product.in_stock,
        }
    }
}

/// Convert a list of cards for a product grid.
fn product_views(cards: &[ProductCard<'_>]) -> Vec<ProductView> {
    cards.iter().map(ProductView::from).collect()
}

// =============================================================================
// Routers
// =============================================================================

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(products::show))
        .route("/{id}/select", post(products::select))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/close", post(cart::close))
        .route("/count", get(cart::count))
}

/// Create the favorites routes router.
pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::index))
        .route("/toggle", post(favorites::toggle))
}

/// Create the content page routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route(NavTarget::About.path(), get(pages::about))
        .route(NavTarget::News.path(), get(pages::news))
        .route(NavTarget::Delivery.path(), get(pages::delivery))
        .route(NavTarget::Contacts.path(), get(pages::contacts))
        .route(NavTarget::Faq.path(), get(pages::faq))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/catalog", get(catalog::index))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/favorites", favorite_routes())
        .merge(page_routes())
}
