//! The per-shopper state container.
//!
//! [`ShopState`] is owned by whoever drives the UI (the storefront keeps one
//! per session) and only changes through [`ShopState::dispatch`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, CartError};
use crate::catalog::{Catalog, CategoryFilter, Product};
use crate::favorites::Favorites;
use crate::page::{NavTarget, Page, Selection};
use crate::types::ProductId;

/// Errors from dispatching an action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShopError {
    #[error("Unknown product {0}")]
    UnknownProduct(ProductId),
    #[error("No product is open")]
    NoProductOpen,
    #[error("Product {product_id} is not offered in color {color:?}")]
    UnknownColor { product_id: ProductId, color: String },
    #[error("Product {product_id} is not offered in size {size:?}")]
    UnknownSize { product_id: ProductId, size: String },
    #[error("Product {0} is out of stock")]
    OutOfStock(ProductId),
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Everything a shopper can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Follow a menu entry.
    Navigate(NavTarget),
    /// Open a product card, selecting its first color and size.
    OpenProduct(ProductId),
    /// Pick a color on the open product page.
    SelectColor(String),
    /// Pick a size on the open product page.
    SelectSize(String),
    /// Pick a color and a size together. Neither applies unless both are
    /// offered.
    SelectVariant {
        color: Option<String>,
        size: Option<String>,
    },
    /// Change the catalog filter.
    SelectCategory(CategoryFilter),
    /// Add one unit to the cart and open the cart drawer.
    AddToCart {
        product_id: ProductId,
        color: Option<String>,
        size: Option<String>,
    },
    RemoveFromCart(usize),
    UpdateQuantity { index: usize, delta: i32 },
    ToggleFavorite(ProductId),
    OpenCart,
    CloseCart,
}

/// Page, selection, cart and favorites of one shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopState {
    page: Page,
    category: CategoryFilter,
    cart: Cart,
    favorites: Favorites,
    cart_open: bool,
}

impl ShopState {
    /// A fresh shopper on the home page with nothing in the cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// The catalog filter, kept while the shopper is on other pages.
    #[must_use]
    pub const fn category(&self) -> &CategoryFilter {
        &self.category
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    #[must_use]
    pub const fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    /// Apply `action`.
    ///
    /// Out-of-range cart indices are ignored. Nothing changes when an error
    /// is returned.
    ///
    /// # Errors
    ///
    /// Returns `ShopError` for product ids missing from `catalog`, for
    /// color/size picks without an open product, for colors or sizes the
    /// product does not offer, and for adding an out-of-stock product.
    pub fn dispatch(&mut self, catalog: &Catalog, action: Action) -> Result<(), ShopError> {
        match action {
            Action::Navigate(target) => {
                self.page = target.page();
            }
            Action::OpenProduct(id) => {
                let product = lookup(catalog, id)?;
                let selection = Selection::for_product(product)
                    .ok_or(CartError::NoVariants(product.id))?;
                self.page = Page::Product(selection);
            }
            Action::SelectColor(color) => {
                let (product, selection) = self.open_product(catalog)?;
                if !product.has_color(&color) {
                    return Err(ShopError::UnknownColor {
                        product_id: product.id,
                        color,
                    });
                }
                selection.color = color;
            }
            Action::SelectSize(size) => {
                let (product, selection) = self.open_product(catalog)?;
                if !product.has_size(&size) {
                    return Err(ShopError::UnknownSize {
                        product_id: product.id,
                        size,
                    });
                }
                selection.size = size;
            }
            Action::SelectVariant { color, size } => {
                let (product, selection) = self.open_product(catalog)?;
                if let Some(color) = color.as_ref().filter(|c| !product.has_color(c)) {
                    return Err(ShopError::UnknownColor {
                        product_id: product.id,
                        color: color.clone(),
                    });
                }
                if let Some(size) = size.as_ref().filter(|s| !product.has_size(s)) {
                    return Err(ShopError::UnknownSize {
                        product_id: product.id,
                        size: size.clone(),
                    });
                }
                if let Some(color) = color {
                    selection.color = color;
                }
                if let Some(size) = size {
                    selection.size = size;
                }
            }
            Action::SelectCategory(category) => {
                self.category = category;
            }
            Action::AddToCart {
                product_id,
                color,
                size,
            } => {
                let product = lookup(catalog, product_id)?;
                if !product.in_stock {
                    return Err(ShopError::OutOfStock(product_id));
                }
                // The open product page's picks apply when the form leaves
                // them out.
                let selection = self
                    .page
                    .selection()
                    .filter(|s| s.product_id == product_id);
                let color = color.or_else(|| selection.map(|s| s.color.clone()));
                let size = size.or_else(|| selection.map(|s| s.size.clone()));
                self.cart
                    .add(product, color.as_deref(), size.as_deref())?;
                self.cart_open = true;
            }
            Action::RemoveFromCart(index) => {
                self.cart.remove(index);
            }
            Action::UpdateQuantity { index, delta } => {
                self.cart.update_quantity(index, delta);
            }
            Action::ToggleFavorite(id) => {
                lookup(catalog, id)?;
                self.favorites.toggle(id);
            }
            Action::OpenCart => self.cart_open = true,
            Action::CloseCart => self.cart_open = false,
        }
        Ok(())
    }

    /// The product being viewed and its mutable selection.
    fn open_product<'c>(
        &mut self,
        catalog: &'c Catalog,
    ) -> Result<(&'c Product, &mut Selection), ShopError> {
        let Page::Product(selection) = &mut self.page else {
            return Err(ShopError::NoProductOpen);
        };
        let product = lookup(catalog, selection.product_id)?;
        Ok((product, selection))
    }
}

fn lookup(catalog: &Catalog, id: ProductId) -> Result<&Product, ShopError> {
    catalog.get(id).ok_or(ShopError::UnknownProduct(id))
}
