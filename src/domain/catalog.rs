use std::collections::BTreeMap;

use serde::Serialize;

use super::Cents;

/// A price observed for an item at one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorePrice<'a> {
    pub store: &'a str,
    pub price: Cents,
}

/// Reference table of observed prices: item -> store -> price.
/// Both levels are kept in ascending key order.
#[derive(Debug, Default)]
pub struct PriceCatalog {
    items: BTreeMap<String, BTreeMap<String, Cents>>,
}

impl PriceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the price for `(item, store)`.
    /// Returns the price it replaced, if any. No history is kept.
    pub fn set_price(
        &mut self,
        item: impl Into<String>,
        store: impl Into<String>,
        price: Cents,
    ) -> Option<Cents> {
        self.items
            .entry(item.into())
            .or_default()
            .insert(store.into(), price)
    }

    /// All recorded prices for `item` in store-name order.
    pub fn prices_for(&self, item: &str) -> Vec<StorePrice<'_>> {
        self.items
            .get(item)
            .map(|stores| {
                stores
                    .iter()
                    .map(|(store, &price)| StorePrice { store, price })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The lowest recorded price for `item`.
    ///
    /// Stores are scanned in name order and only a strictly lower price
    /// replaces the current pick, so ties go to the smallest store name.
    pub fn cheapest(&self, item: &str) -> Option<StorePrice<'_>> {
        self.prices_for(item)
            .into_iter()
            .reduce(|best, next| if next.price < best.price { next } else { best })
    }

    /// Item names in ascending order.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
