//! Catalog route handler.
//!
//! The chosen category is kept in the shopper state, so `/catalog` without a
//! query shows the last filter again.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use luxury_core::{Action, CategoryFilter, NavTarget, ViewModel};
use serde::Deserialize;
use tracing::instrument;

use super::{Layout, ProductView, product_views};
use crate::error::Result;
use crate::filters;
use crate::middleware::ShopSession;
use crate::state::AppState;

/// Catalog query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

/// A category filter button.
#[derive(Clone)]
pub struct CategoryLink {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog.html")]
pub struct CatalogTemplate {
    pub layout: Layout,
    pub categories: Vec<CategoryLink>,
    pub products: Vec<ProductView>,
}

/// URL of the catalog filtered by `label`.
#[must_use]
pub fn category_href(label: &str) -> String {
    format!("/catalog?category={}", urlencoding::encode(label))
}

/// Display the catalog, applying `?category=` when present.
#[instrument(skip(state, shop))]
pub async fn index(
    State(state): State<AppState>,
    mut shop: ShopSession,
    Query(query): Query<CatalogQuery>,
) -> Result<CatalogTemplate> {
    shop.visit(state.catalog(), Action::Navigate(NavTarget::Catalog))
        .await?;
    // A chosen filter is worth a session, a plain visit is not
    if let Some(category) = query.category {
        shop.dispatch(
            state.catalog(),
            Action::SelectCategory(CategoryFilter::parse(&category)),
        )
        .await?;
    }

    let view = ViewModel::derive(shop.state(), state.catalog());
    let categories = view
        .categories
        .iter()
        .map(|item| CategoryLink {
            label: item.label.to_string(),
            href: category_href(item.label),
            active: item.active,
        })
        .collect();

    Ok(CatalogTemplate {
        layout: Layout::new("Catalog", &view),
        categories,
        products: product_views(&view.products),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_href_is_encoded() {
        assert_eq!(category_href("All"), "/catalog?category=All");
        assert_eq!(
            category_href("Watches & Jewelry"),
            "/catalog?category=Watches%20%26%20Jewelry"
        );
    }
}
