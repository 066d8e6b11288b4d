//! Favorites route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use luxury_core::{Action, NavTarget, ProductId, ViewModel};
use serde::Deserialize;
use tracing::instrument;

use super::{Layout, ProductView, product_views};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::ShopSession;
use crate::state::AppState;

/// Favorites page template.
#[derive(Template, WebTemplate)]
#[template(path = "favorites.html")]
pub struct FavoritesTemplate {
    pub layout: Layout,
    pub products: Vec<ProductView>,
}

/// Toggle favorite form data.
#[derive(Debug, Deserialize)]
pub struct ToggleFavoriteForm {
    pub product_id: ProductId,
}

/// Display the favorite products in catalog order.
#[instrument(skip(state, shop))]
pub async fn index(
    State(state): State<AppState>,
    mut shop: ShopSession,
) -> Result<FavoritesTemplate> {
    shop.visit(state.catalog(), Action::Navigate(NavTarget::Favorites))
        .await?;

    let view = ViewModel::derive(shop.state(), state.catalog());

    Ok(FavoritesTemplate {
        layout: Layout::new("Favorites", &view),
        products: product_views(&view.favorites),
    })
}

/// Add or remove a favorite, then return to the current page.
///
/// # Errors
///
/// Returns 404 if the product is not in the catalog.
#[instrument(skip(state, shop))]
pub async fn toggle(
    State(state): State<AppState>,
    mut shop: ShopSession,
    Form(form): Form<ToggleFavoriteForm>,
) -> Result<Redirect> {
    shop.dispatch(state.catalog(), Action::ToggleFavorite(form.product_id))
        .await?;

    let product_id = form.product_id.to_string();
    let message = if shop.state().favorites().contains(form.product_id) {
        "Added favorite"
    } else {
        "Removed favorite"
    };
    add_breadcrumb("favorites", message, Some(&[("product_id", &product_id)]));

    Ok(Redirect::to(&shop.state().page().path()))
}
