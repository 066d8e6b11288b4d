//! Derived view model.
//!
//! Nothing here is stored: [`ViewModel::derive`] recomputes every list and
//! total from the current [`ShopState`] each time the UI renders.

use crate::cart::CartLine;
use crate::catalog::{Catalog, Product};
use crate::page::{NavTarget, Page};
use crate::store::ShopState;
use crate::types::Price;

/// Number of products shown on the home page.
pub const FEATURED_COUNT: usize = 3;

/// A product as shown in a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard<'a> {
    pub product: &'a Product,
    pub price: Price,
    pub old_price: Option<Price>,
    pub discount_percent: Option<u32>,
    pub is_favorite: bool,
}

/// The open product with the current color and size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail<'a> {
    pub card: ProductCard<'a>,
    pub color: &'a str,
    pub size: &'a str,
}

/// A menu entry and whether it is the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub target: NavTarget,
    pub active: bool,
}

/// A catalog filter button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryItem<'a> {
    pub label: &'a str,
    pub active: bool,
}

/// A cart line with its position, used to address it in updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView<'a> {
    pub index: usize,
    pub line: &'a CartLine,
    pub unit_price: Price,
    pub line_total: Price,
}

/// Everything needed to render the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel<'a> {
    pub page: &'a Page,
    pub nav: Vec<NavItem>,
    pub categories: Vec<CategoryItem<'a>>,
    /// Catalog products matching the current filter.
    pub products: Vec<ProductCard<'a>>,
    pub featured: Vec<ProductCard<'a>>,
    /// `None` off the product page, or when the selected product is no
    /// longer in the catalog.
    pub product: Option<ProductDetail<'a>>,
    pub cart_lines: Vec<CartLineView<'a>>,
    pub cart_total: Price,
    /// Number of distinct cart lines.
    pub cart_count: usize,
    /// Whether the cart drawer is shown over the page.
    pub cart_open: bool,
    pub favorites: Vec<ProductCard<'a>>,
}

impl<'a> ViewModel<'a> {
    #[must_use]
    pub fn derive(state: &'a ShopState, catalog: &'a Catalog) -> Self {
        let card = |product: &'a Product| ProductCard {
            product,
            price: catalog.price(product.price),
            old_price: product.old_price.map(|amount| catalog.price(amount)),
            discount_percent: product.discount_percent(),
            is_favorite: state.favorites().contains(product.id),
        };

        let current = state.page().nav_target();
        let nav = NavTarget::ALL
            .iter()
            .map(|&target| NavItem {
                target,
                active: current == Some(target),
            })
            .collect();

        let active_category = state.category().label();
        let categories = catalog
            .categories()
            .into_iter()
            .map(|label| CategoryItem {
                label,
                active: label == active_category,
            })
            .collect();

        let product = state.page().selection().and_then(|selection| {
            catalog
                .get(selection.product_id)
                .map(|product| ProductDetail {
                    card: card(product),
                    color: &selection.color,
                    size: &selection.size,
                })
        });

        let cart_lines = state
            .cart()
            .lines()
            .iter()
            .enumerate()
            .map(|(index, line)| CartLineView {
                index,
                line,
                unit_price: catalog.price(line.product().price),
                line_total: catalog.price(line.line_total()),
            })
            .collect();

        Self {
            page: state.page(),
            nav,
            categories,
            products: catalog
                .filter(state.category())
                .into_iter()
                .map(card)
                .collect(),
            featured: catalog
                .featured(FEATURED_COUNT)
                .into_iter()
                .map(card)
                .collect(),
            product,
            cart_lines,
            cart_total: catalog.price(state.cart().total()),
            cart_count: state.cart().len(),
            cart_open: state.is_cart_open(),
            favorites: state
                .favorites()
                .list(catalog)
                .into_iter()
                .map(card)
                .collect(),
        }
    }
}
