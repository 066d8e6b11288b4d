//! Product detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use luxury_core::{Action, ProductDetail, ProductId, ViewModel};
use serde::Deserialize;
use tracing::instrument;

use super::{Layout, ProductView};
use crate::error::Result;
use crate::filters;
use crate::middleware::ShopSession;
use crate::state::AppState;

/// A color or size choice on the product page.
#[derive(Clone)]
pub struct VariantChoice {
    pub value: String,
    pub selected: bool,
}

/// The open product with its variant choices.
#[derive(Clone)]
pub struct ProductDetailView {
    pub product: ProductView,
    pub colors: Vec<VariantChoice>,
    pub sizes: Vec<VariantChoice>,
    pub color: String,
    pub size: String,
}

impl From<&ProductDetail<'_>> for ProductDetailView {
    fn from(detail: &ProductDetail<'_>) -> Self {
        let choices = |values: &[String], current: &str| {
            values
                .iter()
                .map(|value| VariantChoice {
                    value: value.clone(),
                    selected: value == current,
                })
                .collect()
        };

        Self {
            product: ProductView::from(&detail.card),
            colors: choices(&detail.card.product.colors, detail.color),
            sizes: choices(&detail.card.product.sizes, detail.size),
            color: detail.color.to_string(),
            size: detail.size.to_string(),
        }
    }
}

/// Product page template.
#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductTemplate {
    pub layout: Layout,
    /// `None` renders an empty product section.
    pub product: Option<ProductDetailView>,
}

/// Color/size selection form data. Blank fields are ignored.
#[derive(Debug, Deserialize)]
pub struct SelectForm {
    pub color: Option<String>,
    pub size: Option<String>,
}

/// The action opening `id`, unless the shopper is already looking at it.
///
/// Reloading the page keeps the color and size picked so far.
fn open_action(shop: &ShopSession, id: ProductId) -> Option<Action> {
    let already_open = shop
        .state()
        .page()
        .selection()
        .is_some_and(|selection| selection.product_id == id);
    (!already_open).then_some(Action::OpenProduct(id))
}

/// Treat blank form fields as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Display product detail page.
///
/// # Errors
///
/// Returns 404 if the product is not in the catalog.
#[instrument(skip(state, shop))]
pub async fn show(
    State(state): State<AppState>,
    mut shop: ShopSession,
    Path(id): Path<ProductId>,
) -> Result<ProductTemplate> {
    if let Some(open) = open_action(&shop, id) {
        shop.visit(state.catalog(), open).await?;
    }

    let view = ViewModel::derive(shop.state(), state.catalog());
    let product = view.product.as_ref().map(ProductDetailView::from);
    let title = product
        .as_ref()
        .map_or_else(|| "Product".to_string(), |p| p.product.name.clone());

    Ok(ProductTemplate {
        layout: Layout::new(title, &view),
        product,
    })
}

/// Pick a color and/or size for the product.
///
/// Both picks are applied together: if either is not offered, neither is.
///
/// # Errors
///
/// Returns 404 for an unknown product, 400 for a color or size it does not
/// come in.
#[instrument(skip(state, shop))]
pub async fn select(
    State(state): State<AppState>,
    mut shop: ShopSession,
    Path(id): Path<ProductId>,
    Form(form): Form<SelectForm>,
) -> Result<Redirect> {
    let select = Action::SelectVariant {
        color: non_blank(form.color),
        size: non_blank(form.size),
    };
    let actions = open_action(&shop, id).into_iter().chain([select]);
    shop.dispatch_all(state.catalog(), actions).await?;

    Ok(Redirect::to(&shop.state().page().path()))
}
