//! The product catalog fixture and category filtering.
//!
//! The catalog is loaded once at startup and never changes afterwards. Every
//! list the storefront shows is derived from it in catalog order.

use std::collections::HashSet;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CurrencyCode, Price, ProductId};

/// Label of the category filter that shows every product.
pub const ALL_CATEGORIES: &str = "All";

/// Errors raised while loading the catalog fixture.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid catalog fixture: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("Product {0} has an empty name")]
    EmptyName(ProductId),
    #[error("Product {0} has a negative price")]
    NegativePrice(ProductId),
    #[error("Product {0} has no colors")]
    NoColors(ProductId),
    #[error("Product {0} has no sizes")]
    NoSizes(ProductId),
}

/// A product offered by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Current price in whole currency units.
    pub price: Decimal,
    /// Price before the discount, shown struck through.
    #[serde(default)]
    pub old_price: Option<Decimal>,
    /// Absolute image URL.
    pub image: String,
    pub category: String,
    /// Available colors, first one is the default.
    pub colors: Vec<String>,
    /// Available sizes, first one is the default.
    pub sizes: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    /// The color selected when the product is opened.
    #[must_use]
    pub fn default_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }

    /// The size selected when the product is opened.
    #[must_use]
    pub fn default_size(&self) -> Option<&str> {
        self.sizes.first().map(String::as_str)
    }

    #[must_use]
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    #[must_use]
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Discount against the old price, in whole percent.
    ///
    /// `None` when there is no old price or it is not above the current price.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let old = self.old_price?;
        if old <= self.price || old.is_zero() {
            return None;
        }
        ((old - self.price) / old * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
    }
}

/// Which categories the catalog page is showing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parse a category label. [`ALL_CATEGORIES`] and the empty string mean
    /// no filtering.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(label.to_string())
        }
    }

    /// The label shown on the filter button.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(label) => label,
        }
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(label) => product.category == *label,
        }
    }
}

/// Shape of the JSON fixture file.
#[derive(Deserialize)]
struct CatalogFixture {
    #[serde(default)]
    currency: CurrencyCode,
    products: Vec<Product>,
}

/// The immutable, ordered product catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    currency: CurrencyCode,
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, checking that ids are unique and every product offers
    /// at least one color and one size.
    ///
    /// # Errors
    ///
    /// Returns the first `CatalogError` found, in catalog order.
    pub fn new(currency: CurrencyCode, products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(product.id));
            }
            if product.price.is_sign_negative() {
                return Err(CatalogError::NegativePrice(product.id));
            }
            if product.colors.is_empty() {
                return Err(CatalogError::NoColors(product.id));
            }
            if product.sizes.is_empty() {
                return Err(CatalogError::NoSizes(product.id));
            }
        }

        Ok(Self { currency, products })
    }

    /// Parse and validate a JSON fixture.
    ///
    /// ```json
    /// { "currency": "RUB", "products": [ { "id": 1, "name": "...", ... } ] }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, or a validation error.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_json::from_str(json)?;
        Self::new(fixture.currency, fixture.products)
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Attach the catalog currency to an amount.
    #[must_use]
    pub const fn price(&self, amount: Decimal) -> Price {
        Price::new(amount, self.currency)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Filter labels: [`ALL_CATEGORIES`] followed by each distinct category in
    /// the order it first appears.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![ALL_CATEGORIES];
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }

    /// Products matching `filter`, in catalog order.
    #[must_use]
    pub fn filter(&self, filter: &CategoryFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// The first `count` products, shown on the home page.
    #[must_use]
    pub fn featured(&self, count: usize) -> Vec<&Product> {
        self.products.iter().take(count).collect()
    }
}

/// Build a product for tests with a single color and size.
#[cfg(test)]
pub(crate) fn test_product(id: i32, category: &str, price: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Decimal::from(price),
        old_price: None,
        image: format!("https://images.example.test/{id}.jpg"),
        category: category.to_string(),
        colors: vec!["Black".to_string(), "Brown".to_string()],
        sizes: vec!["One Size".to_string()],
        in_stock: true,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scenario_catalog() -> Catalog {
        Catalog::new(
            CurrencyCode::RUB,
            vec![
                test_product(1, "Bags", 89_900),
                test_product(2, "Watches", 349_900),
                test_product(3, "Bags", 129_900),
            ],
        )
        .unwrap()
    }

    fn ids(products: &[&Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_categories_start_with_all_in_first_occurrence_order() {
        let catalog = scenario_catalog();
        assert_eq!(catalog.categories(), vec!["All", "Bags", "Watches"]);
    }

    #[test]
    fn test_filter_by_category_preserves_order() {
        let catalog = scenario_catalog();
        let bags = catalog.filter(&CategoryFilter::parse("Bags"));
        assert_eq!(ids(&bags), vec![1, 3]);
    }

    #[test]
    fn test_filter_all_returns_full_catalog() {
        let catalog = scenario_catalog();
        let all = catalog.filter(&CategoryFilter::All);
        assert_eq!(ids(&all), vec![1, 2, 3]);
    }

    #[test]
    fn test_filter_is_subset_of_catalog() {
        let catalog = scenario_catalog();
        for label in catalog.categories() {
            let filtered = catalog.filter(&CategoryFilter::parse(label));
            assert!(filtered.iter().all(|p| catalog.get(p.id).is_some()));
            assert!(filtered.len() <= catalog.len());
        }
    }

    #[test]
    fn test_filter_unknown_category_is_empty() {
        let catalog = scenario_catalog();
        assert!(catalog.filter(&CategoryFilter::parse("Shoes")).is_empty());
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse(" Bags "),
            CategoryFilter::Category("Bags".to_string())
        );
        assert_eq!(CategoryFilter::All.label(), "All");
    }

    #[test]
    fn test_featured_takes_first_products() {
        let catalog = scenario_catalog();
        assert_eq!(ids(&catalog.featured(2)), vec![1, 2]);
        assert_eq!(ids(&catalog.featured(10)), vec![1, 2, 3]);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(
            CurrencyCode::RUB,
            vec![test_product(1, "Bags", 1), test_product(1, "Bags", 2)],
        );
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id.as_i32() == 1));
    }

    #[test]
    fn test_rejects_empty_colors_and_sizes() {
        let mut product = test_product(4, "Bags", 1);
        product.colors.clear();
        let result = Catalog::new(CurrencyCode::RUB, vec![product]);
        assert!(matches!(result, Err(CatalogError::NoColors(_))));

        let mut product = test_product(5, "Bags", 1);
        product.sizes.clear();
        let result = Catalog::new(CurrencyCode::RUB, vec![product]);
        assert!(matches!(result, Err(CatalogError::NoSizes(_))));
    }

    #[test]
    fn test_from_json_defaults() {
        let json = r#"{
            "products": [{
                "id": 5,
                "name": "Cufflinks",
                "price": 49900,
                "old_price": 69900,
                "image": "https://images.example.test/5.jpg",
                "category": "Accessories",
                "colors": ["Silver"],
                "sizes": ["One Size"]
            }]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.currency(), CurrencyCode::RUB);
        let product = catalog.get(ProductId::new(5)).unwrap();
        assert!(product.in_stock);
        assert_eq!(product.price, Decimal::from(49_900));
        assert_eq!(product.discount_percent(), Some(29));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(
            Catalog::from_json("{\"products\": 3}"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_discount_percent() {
        let mut product = test_product(1, "Bags", 89_900);
        assert_eq!(product.discount_percent(), None);
        product.old_price = Some(Decimal::from(119_900));
        assert_eq!(product.discount_percent(), Some(25));
        product.old_price = Some(Decimal::from(80_000));
        assert_eq!(product.discount_percent(), None);
    }

    #[test]
    fn test_default_variant_is_first_listed() {
        let product = test_product(1, "Bags", 1);
        assert_eq!(product.default_color(), Some("Black"));
        assert_eq!(product.default_size(), Some("One Size"));
        assert!(product.has_color("Brown"));
        assert!(!product.has_size("XL"));
    }
}
