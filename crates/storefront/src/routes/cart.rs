//! Cart route handlers.
//!
//! The cart lives in the shopper state. Mutations open the drawer and
//! redirect to the page the shopper is on, where the layout renders the
//! drawer over it. Closing the drawer returns to the same page without it.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use luxury_core::{Action, CartLineView, ProductId, ViewModel};
use serde::Deserialize;
use tracing::instrument;

use super::Layout;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::ShopSession;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    /// Position in the cart, used by the update and remove forms.
    pub index: usize,
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub color: String,
    pub size: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl CartItemView {
    fn new(view: &CartLineView<'_>) -> Self {
        let product = view.line.product();
        Self {
            index: view.index,
            product_id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            color: view.line.color().to_string(),
            size: view.line.size().to_string(),
            quantity: view.line.quantity(),
            price: view.unit_price.display(),
            line_price: view.line_total.display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: usize,
}

impl From<&ViewModel<'_>> for CartView {
    fn from(view: &ViewModel<'_>) -> Self {
        Self {
            items: view.cart_lines.iter().map(CartItemView::new).collect(),
            total: view.cart_total.display(),
            item_count: view.cart_count,
        }
    }
}

/// Add to cart form data.
///
/// Missing color or size falls back to the open product page selection, then
/// to the product's first option.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub index: usize,
    pub delta: i32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub index: usize,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartShowTemplate {
    pub layout: Layout,
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: usize,
}

/// Display the cart on its own page and leave the drawer open.
#[instrument(skip(state, shop))]
pub async fn show(
    State(state): State<AppState>,
    mut shop: ShopSession,
) -> Result<CartShowTemplate> {
    shop.visit(state.catalog(), Action::OpenCart).await?;

    let view = ViewModel::derive(shop.state(), state.catalog());

    // The page itself shows the cart, no drawer on top
    Ok(CartShowTemplate {
        layout: Layout {
            drawer: None,
            ..Layout::new("Cart", &view)
        },
        cart: CartView::from(&view),
    })
}

/// Back to the page the shopper is on, with the drawer open.
fn back_to_drawer(shop: &ShopSession) -> Redirect {
    Redirect::to(&shop.state().page().path())
}

/// Add one unit of a product to the cart.
///
/// # Errors
///
/// Returns 404 for an unknown product, 400 for a color or size it does not
/// come in or a product that is out of stock.
#[instrument(skip(state, shop))]
pub async fn add(
    State(state): State<AppState>,
    mut shop: ShopSession,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product_id = form.product_id.to_string();
    shop.dispatch(
        state.catalog(),
        Action::AddToCart {
            product_id: form.product_id,
            color: form.color.filter(|c| !c.trim().is_empty()),
            size: form.size.filter(|s| !s.trim().is_empty()),
        },
    )
    .await?;

    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", &product_id)]));
    Ok(back_to_drawer(&shop))
}

/// Change the quantity of a cart line by `delta`, never below 1.
#[instrument(skip(state, shop))]
pub async fn update(
    State(state): State<AppState>,
    mut shop: ShopSession,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    shop.dispatch_all(
        state.catalog(),
        [
            Action::UpdateQuantity {
                index: form.index,
                delta: form.delta,
            },
            Action::OpenCart,
        ],
    )
    .await?;

    Ok(back_to_drawer(&shop))
}

/// Remove a cart line.
#[instrument(skip(state, shop))]
pub async fn remove(
    State(state): State<AppState>,
    mut shop: ShopSession,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    shop.dispatch_all(
        state.catalog(),
        [Action::RemoveFromCart(form.index), Action::OpenCart],
    )
    .await?;

    add_breadcrumb("cart", "Removed from cart", None);
    Ok(back_to_drawer(&shop))
}

/// Close the drawer and go back to the current page.
#[instrument(skip(state, shop))]
pub async fn close(State(state): State<AppState>, mut shop: ShopSession) -> Result<Redirect> {
    shop.dispatch(state.catalog(), Action::CloseCart).await?;

    Ok(Redirect::to(&shop.state().page().path()))
}

/// Get cart count badge.
#[instrument(skip(shop))]
pub async fn count(shop: ShopSession) -> CartCountTemplate {
    CartCountTemplate {
        count: shop.state().cart().len(),
    }
}
