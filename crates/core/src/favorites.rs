//! Favorited products.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::types::ProductId;

/// Set of favorited product ids. Membership is the only state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorites {
    ids: HashSet<ProductId>,
}

impl Favorites {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns whether it is a favorite afterwards.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    /// Favorited products in catalog order. Ids missing from the catalog are
    /// skipped.
    #[must_use]
    pub fn list<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        catalog
            .products()
            .iter()
            .filter(|p| self.contains(p.id))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::test_product;
    use crate::types::CurrencyCode;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut favorites = Favorites::new();
        assert!(favorites.toggle(ProductId::new(3)));
        assert!(favorites.contains(ProductId::new(3)));
        assert_eq!(favorites.len(), 1);

        assert!(!favorites.toggle(ProductId::new(3)));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_double_toggle_restores_original_set() {
        let mut favorites = Favorites::new();
        favorites.toggle(ProductId::new(1));
        favorites.toggle(ProductId::new(4));
        let before = favorites.clone();

        favorites.toggle(ProductId::new(2));
        favorites.toggle(ProductId::new(2));
        assert_eq!(favorites, before);

        favorites.toggle(ProductId::new(4));
        favorites.toggle(ProductId::new(4));
        assert_eq!(favorites, before);
    }

    #[test]
    fn test_list_follows_catalog_order() {
        let catalog = Catalog::new(
            CurrencyCode::RUB,
            vec![
                test_product(1, "Bags", 1),
                test_product(2, "Watches", 1),
                test_product(3, "Bags", 1),
            ],
        )
        .unwrap();
        let mut favorites = Favorites::new();
        favorites.toggle(ProductId::new(3));
        favorites.toggle(ProductId::new(1));
        favorites.toggle(ProductId::new(99));

        let listed: Vec<i32> = favorites
            .list(&catalog)
            .iter()
            .map(|p| p.id.as_i32())
            .collect();
        assert_eq!(listed, vec![1, 3]);
    }
}
