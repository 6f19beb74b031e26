use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::{checked_total, Cents, ExpenseId, ExpenseRecord};

/// In-memory expense store with three coordinated views.
///
/// `records` is the canonical by-id store. The category buckets and the
/// chronological index hold ids only, so every record exists exactly once
/// and a single `add_expense` call updates all views before returning.
#[derive(Debug, Default)]
pub struct ExpenseLedger {
    records: BTreeMap<ExpenseId, ExpenseRecord>,
    by_category: BTreeMap<String, Vec<ExpenseId>>,
    by_date: BTreeSet<(String, ExpenseId)>,
    last_id: ExpenseId,
}

/// Total spent in one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal<'a> {
    pub category: &'a str,
    pub total: Cents,
    pub count: usize,
}

/// Per-category totals in ascending category order, plus the grand total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryTotals<'a> {
    pub categories: Vec<CategoryTotal<'a>>,
    pub total: Cents,
}

/// The summed amounts no longer fit in `Cents`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("total of {category} exceeds the largest representable amount")]
pub struct TotalOverflow {
    /// Category whose sum overflowed, or `"TOTAL"` for the grand total
    pub category: String,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new expense and return its id.
    /// Ids start at 1 and grow by one per call. No field is validated here.
    pub fn add_expense(
        &mut self,
        date: impl Into<String>,
        amount: Cents,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> ExpenseId {
        self.last_id += 1;
        let id = self.last_id;
        let record = ExpenseRecord::new(
            id,
            date.into(),
            amount,
            category.into(),
            description.into(),
        );

        self.by_date.insert(record.date_key());
        self.by_category
            .entry(record.category.clone())
            .or_default()
            .push(id);
        self.records.insert(id, record);

        id
    }

    pub fn get(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.records.get(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Category labels in ascending lexical order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.by_category.keys().map(String::as_str)
    }

    /// Expenses of one category in insertion order.
    /// Unknown categories yield an empty list.
    pub fn list_by_category(&self, category: &str) -> Vec<&ExpenseRecord> {
        self.by_category
            .get(category)
            .map(|ids| self.resolve(ids.iter()))
            .unwrap_or_default()
    }

    /// Every expense ordered by `(date, id)` ascending.
    pub fn list_all_by_date(&self) -> Vec<&ExpenseRecord> {
        self.resolve(self.by_date.iter().map(|(_, id)| id))
    }

    /// Sum of amounts per category, categories in ascending lexical order.
    /// A category only appears once it holds at least one expense.
    ///
    /// Sums are exact; a sum outside the `Cents` range is an error instead
    /// of a wrapped value.
    pub fn category_totals(&self) -> Result<CategoryTotals<'_>, TotalOverflow> {
        let categories = self
            .by_category
            .iter()
            .map(|(category, ids)| {
                let amounts = self.resolve(ids.iter()).into_iter().map(|r| r.amount);
                checked_total(amounts)
                    .map(|total| CategoryTotal {
                        category,
                        total,
                        count: ids.len(),
                    })
                    .ok_or_else(|| TotalOverflow {
                        category: category.clone(),
                    })
            })
            .collect::<Result<Vec<CategoryTotal<'_>>, TotalOverflow>>()?;
        let total =
            checked_total(categories.iter().map(|c| c.total)).ok_or_else(|| TotalOverflow {
                category: "TOTAL".to_string(),
            })?;

        Ok(CategoryTotals { categories, total })
    }

    fn resolve<'a>(&'a self, ids: impl Iterator<Item = &'a ExpenseId>) -> Vec<&'a ExpenseRecord> {
        ids.filter_map(|id| self.records.get(id)).collect()
    }
}
