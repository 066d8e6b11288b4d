//! Shopping cart lines keyed by product, color and size.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::types::ProductId;

/// Errors from adding a product to the cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Product {product_id} is not offered in color {color:?}")]
    UnknownColor { product_id: ProductId, color: String },
    #[error("Product {product_id} is not offered in size {size:?}")]
    UnknownSize { product_id: ProductId, size: String },
    #[error("Product {0} has no colors or sizes to choose from")]
    NoVariants(ProductId),
}

/// One (product, color, size) combination and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    product: Product,
    quantity: u32,
    color: String,
    size: String,
}

impl CartLine {
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn size(&self) -> &str {
        &self.size
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }

    fn is_same_variant(&self, product_id: ProductId, color: &str, size: &str) -> bool {
        self.product.id == product_id && self.color == color && self.size == size
    }
}

/// Ordered cart lines. No two lines share product, color and size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product`.
    ///
    /// A missing color or size falls back to the product's first one. If a
    /// line for the same product, color and size exists its quantity grows by
    /// one, otherwise a new line is appended.
    ///
    /// Returns the index of the line that was created or incremented.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the color or size is not one the product offers.
    pub fn add(
        &mut self,
        product: &Product,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Result<usize, CartError> {
        let color = match color {
            Some(color) if product.has_color(color) => color,
            Some(color) => {
                return Err(CartError::UnknownColor {
                    product_id: product.id,
                    color: color.to_string(),
                });
            }
            None => product
                .default_color()
                .ok_or(CartError::NoVariants(product.id))?,
        };
        let size = match size {
            Some(size) if product.has_size(size) => size,
            Some(size) => {
                return Err(CartError::UnknownSize {
                    product_id: product.id,
                    size: size.to_string(),
                });
            }
            None => product
                .default_size()
                .ok_or(CartError::NoVariants(product.id))?,
        };

        if let Some((index, line)) = self
            .lines
            .iter_mut()
            .enumerate()
            .find(|(_, line)| line.is_same_variant(product.id, color, size))
        {
            line.quantity = line.quantity.saturating_add(1);
            return Ok(index);
        }

        self.lines.push(CartLine {
            product: product.clone(),
            quantity: 1,
            color: color.to_string(),
            size: size.to_string(),
        });
        Ok(self.lines.len() - 1)
    }

    /// Remove the line at `index`. Out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<CartLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    /// Change a line's quantity by `delta`, never going below 1.
    ///
    /// Returns the new quantity, or `None` if `index` is out of range.
    pub fn update_quantity(&mut self, index: usize, delta: i32) -> Option<u32> {
        let line = self.lines.get_mut(index)?;
        let updated = i64::from(line.quantity).saturating_add(i64::from(delta));
        line.quantity = u32::try_from(updated.max(1)).unwrap_or(u32::MAX);
        Some(line.quantity)
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines (what the header badge shows).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}
