//! Static content page route handlers.
//!
//! Serves the markdown-backed menu pages: about, news, delivery, contacts and
//! FAQ.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use chrono::NaiveDate;
use luxury_core::{Action, NavTarget, ViewModel};
use tracing::instrument;

use super::Layout;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::ShopSession;
use crate::state::AppState;

/// Content page template.
#[derive(Template, WebTemplate)]
#[template(path = "content.html")]
pub struct ContentPageTemplate {
    pub layout: Layout,
    pub title: String,
    pub description: String,
    pub updated_at: Option<NaiveDate>,
    pub content_html: String,
}

/// Serve the content page behind a menu entry.
async fn serve_content_page(
    state: &AppState,
    shop: &mut ShopSession,
    target: NavTarget,
) -> Result<ContentPageTemplate> {
    let page = target
        .content_slug()
        .and_then(|slug| state.content().get_page(slug))
        .ok_or_else(|| AppError::NotFound(format!("page {}", target.path())))?;

    shop.visit(state.catalog(), Action::Navigate(target)).await?;
    let view = ViewModel::derive(shop.state(), state.catalog());

    Ok(ContentPageTemplate {
        layout: Layout::new(page.meta.title.clone(), &view),
        title: page.meta.title.clone(),
        description: page.meta.description.clone().unwrap_or_default(),
        updated_at: page.meta.updated_at,
        content_html: page.content_html.clone(),
    })
}

/// Display the About page.
///
/// # Errors
///
/// Returns 404 if the page doesn't exist.
#[instrument(skip(state, shop))]
pub async fn about(
    State(state): State<AppState>,
    mut shop: ShopSession,
) -> Result<ContentPageTemplate> {
    serve_content_page(&state, &mut shop, NavTarget::About).await
}

/// Display the News page.
///
/// # Errors
///
/// Returns 404 if the page doesn't exist.
#[instrument(skip(state, shop))]
pub async fn news(
    State(state): State<AppState>,
    mut shop: ShopSession,
) -> Result<ContentPageTemplate> {
    serve_content_page(&state, &mut shop, NavTarget::News).await
}

/// Display the Delivery page.
///
/// # Errors
///
/// Returns 404 if the page doesn't exist.
#[instrument(skip(state, shop))]
pub async fn delivery(
    State(state): State<AppState>,
    mut shop: ShopSession,
) -> Result<ContentPageTemplate> {
    serve_content_page(&state, &mut shop, NavTarget::Delivery).await
}

/// Display the Contacts page.
///
/// # Errors
///
/// Returns 404 if the page doesn't exist.
#[instrument(skip(state, shop))]
pub async fn contacts(
    State(state): State<AppState>,
    mut shop: ShopSession,
) -> Result<ContentPageTemplate> {
    serve_content_page(&state, &mut shop, NavTarget::Contacts).await
}

/// Display the FAQ page.
///
/// # Errors
///
/// Returns 404 if the page doesn't exist.
#[instrument(skip(state, shop))]
pub async fn faq(
    State(state): State<AppState>,
    mut shop: ShopSession,
) -> Result<ContentPageTemplate> {
    serve_content_page(&state, &mut shop, NavTarget::Faq).await
}
