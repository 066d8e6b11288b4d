//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use luxury_core::{Action, NavTarget, ViewModel};
use tracing::instrument;

use super::{Layout, ProductView, product_views};
use crate::error::Result;
use crate::filters;
use crate::middleware::ShopSession;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    /// First products of the catalog, shown under the hero.
    pub featured: Vec<ProductView>,
}

/// Display the home page.
#[instrument(skip(state, shop))]
pub async fn home(State(state): State<AppState>, mut shop: ShopSession) -> Result<HomeTemplate> {
    shop.visit(state.catalog(), Action::Navigate(NavTarget::Home))
        .await?;

    let view = ViewModel::derive(shop.state(), state.catalog());

    Ok(HomeTemplate {
        layout: Layout::new("Home", &view),
        featured: product_views(&view.featured),
    })
}
