use serde::{Deserialize, Serialize};

use crate::domain::{Cents, StorePrice};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub categories: Vec<CategorySummary>,
    pub total: Cents,
    pub expense_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total: Cents,
    pub count: usize,
    pub average: Cents,
    pub percentage: f64,
}

/// Every quote for one item, with the cheapest pick and how much it saves
/// over the most expensive store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceComparison {
    pub item: String,
    pub quotes: Vec<StoreQuote>,
    pub cheapest: StoreQuote,
    pub savings: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreQuote {
    pub store: String,
    pub price: Cents,
}

impl From<StorePrice<'_>> for StoreQuote {
    fn from(quote: StorePrice<'_>) -> Self {
        Self {
            store: quote.store.to_string(),
            price: quote.price,
        }
    }
}

pub(crate) fn percentage_of(part: Cents, whole: Cents) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}
