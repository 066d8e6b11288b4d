//! Which page the shopper is on, and what is selected on it.
//!
//! The product page carries its own [`Selection`], so a product page without a
//! product cannot be expressed.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::ProductId;

/// The product, color and size being viewed on the product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub product_id: ProductId,
    pub color: String,
    pub size: String,
}

impl Selection {
    /// Select `product` with its first color and first size.
    ///
    /// Returns `None` for a product without colors or sizes, which a
    /// validated catalog never contains.
    #[must_use]
    pub fn for_product(product: &Product) -> Option<Self> {
        Some(Self {
            product_id: product.id,
            color: product.default_color()?.to_string(),
            size: product.default_size()?.to_string(),
        })
    }
}

/// A page of the storefront.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Catalog,
    Product(Selection),
    About,
    News,
    Delivery,
    Contacts,
    Faq,
    Favorites,
}

impl Page {
    /// URL path that renders this page.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Product(selection) => format!("/products/{}", selection.product_id),
            _ => self
                .nav_target()
                .map_or("/", NavTarget::path)
                .to_string(),
        }
    }

    /// The menu entry for this page. The product page has none.
    #[must_use]
    pub const fn nav_target(&self) -> Option<NavTarget> {
        match self {
            Self::Home => Some(NavTarget::Home),
            Self::Catalog => Some(NavTarget::Catalog),
            Self::Product(_) => None,
            Self::About => Some(NavTarget::About),
            Self::News => Some(NavTarget::News),
            Self::Delivery => Some(NavTarget::Delivery),
            Self::Contacts => Some(NavTarget::Contacts),
            Self::Faq => Some(NavTarget::Faq),
            Self::Favorites => Some(NavTarget::Favorites),
        }
    }

    #[must_use]
    pub const fn selection(&self) -> Option<&Selection> {
        match self {
            Self::Product(selection) => Some(selection),
            _ => None,
        }
    }
}

/// Entries of the navigation menu. Every page except the product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavTarget {
    Home,
    Catalog,
    About,
    News,
    Delivery,
    Contacts,
    Faq,
    Favorites,
}

impl NavTarget {
    /// Menu entries in display order.
    pub const ALL: [Self; 8] = [
        Self::Home,
        Self::Catalog,
        Self::About,
        Self::News,
        Self::Delivery,
        Self::Contacts,
        Self::Faq,
        Self::Favorites,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Catalog => "Catalog",
            Self::About => "About",
            Self::News => "News",
            Self::Delivery => "Delivery",
            Self::Contacts => "Contacts",
            Self::Faq => "FAQ",
            Self::Favorites => "Favorites",
        }
    }

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Catalog => "/catalog",
            Self::About => "/about",
            Self::News => "/news",
            Self::Delivery => "/delivery",
            Self::Contacts => "/contacts",
            Self::Faq => "/faq",
            Self::Favorites => "/favorites",
        }
    }

    /// Slug of the markdown page backing this entry, for text-only pages.
    #[must_use]
    pub const fn content_slug(self) -> Option<&'static str> {
        match self {
            Self::About => Some("about"),
            Self::News => Some("news"),
            Self::Delivery => Some("delivery"),
            Self::Contacts => Some("contacts"),
            Self::Faq => Some("faq"),
            Self::Home | Self::Catalog | Self::Favorites => None,
        }
    }

    /// The page this entry leads to.
    #[must_use]
    pub const fn page(self) -> Page {
        match self {
            Self::Home => Page::Home,
            Self::Catalog => Page::Catalog,
            Self::About => Page::About,
            Self::News => Page::News,
            Self::Delivery => Page::Delivery,
            Self::Contacts => Page::Contacts,
            Self::Faq => Page::Faq,
            Self::Favorites => Page::Favorites,
        }
    }
}
