use chrono::{Local, NaiveDate};

use crate::domain::{parse_cents, Cents, ExpenseId, ExpenseLedger, ExpenseRecord, PriceCatalog};

use super::reporting::percentage_of;
use super::{AppError, CategoryReport, CategorySummary, PriceComparison, StoreQuote};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Application service owning one ledger and one price catalog.
/// This is the interface the interactive session (or any other client) drives.
#[derive(Debug, Default)]
pub struct TrackerService {
    ledger: ExpenseLedger,
    catalog: PriceCatalog,
}

impl TrackerService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &ExpenseLedger {
        &self.ledger
    }

    pub fn catalog(&self) -> &PriceCatalog {
        &self.catalog
    }

    // ========================
    // Input parsing
    // ========================

    /// Parse a user-entered amount or price into cents.
    pub fn parse_amount(raw: &str) -> Result<Cents, AppError> {
        parse_cents(raw).map_err(|source| AppError::InvalidAmount {
            input: raw.trim().to_string(),
            source,
        })
    }

    // ========================
    // Expense operations
    // ========================

    /// Record a new expense from user-entered text.
    ///
    /// A blank date means today. Dates that are not `YYYY-MM-DD` are kept
    /// verbatim but will only sort lexically, so they are logged.
    pub fn record_expense(
        &mut self,
        date: &str,
        amount: Cents,
        category: &str,
        description: &str,
    ) -> Result<ExpenseId, AppError> {
        let category = required("Category", category)?;
        let description = required("Description", description)?;
        let date = resolve_date(date, Local::now().date_naive());

        let id = self.ledger.add_expense(date, amount, category, description);
        tracing::info!(id, category, amount, "recorded expense");
        Ok(id)
    }

    pub fn expenses_in_category(&self, category: &str) -> Vec<&ExpenseRecord> {
        let expenses = self.ledger.list_by_category(category.trim());
        tracing::debug!(category, count = expenses.len(), "listed category");
        expenses
    }

    pub fn expenses_by_date(&self) -> Vec<&ExpenseRecord> {
        self.ledger.list_all_by_date()
    }

    /// Spending per category (ascending label order) with counts, averages
    /// and each category's share of the grand total.
    pub fn category_report(&self) -> Result<CategoryReport, AppError> {
        let totals = self.ledger.category_totals()?;

        let categories = totals
            .categories
            .iter()
            .map(|c| {
                let count = c.count as Cents;
                CategorySummary {
                    category: c.category.to_string(),
                    total: c.total,
                    count: c.count,
                    average: if count > 0 { c.total / count } else { 0 },
                    percentage: percentage_of(c.total, totals.total),
                }
            })
            .collect();

        Ok(CategoryReport {
            categories,
            total: totals.total,
            expense_count: self.ledger.len(),
        })
    }

    // ========================
    // Price operations
    // ========================

    /// Record the price of `item` at `store`, returning any price it replaced.
    pub fn record_price(
        &mut self,
        item: &str,
        store: &str,
        price: Cents,
    ) -> Result<Option<Cents>, AppError> {
        let item = required("Item", item)?;
        let store = required("Store", store)?;

        let previous = self.catalog.set_price(item, store, price);
        match previous {
            Some(old) => tracing::info!(item, store, old, price, "overwrote price"),
            None => tracing::info!(item, store, price, "recorded price"),
        }
        Ok(previous)
    }

    /// Full price table for `item` plus the cheapest store.
    /// Returns `None` when no price was ever recorded for the item.
    /// Savings saturate at `Cents::MAX` when the price spread does not fit.
    pub fn price_comparison(&self, item: &str) -> Option<PriceComparison> {
        let item = item.trim();
        let cheapest = self.catalog.cheapest(item)?;
        let quotes = self.catalog.prices_for(item);
        let highest = quotes.iter().map(|q| q.price).max().unwrap_or(cheapest.price);

        Some(PriceComparison {
            item: item.to_string(),
            savings: highest.saturating_sub(cheapest.price),
            cheapest: cheapest.into(),
            quotes: quotes.into_iter().map(StoreQuote::from).collect(),
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        Err(AppError::MissingField(field))
    } else {
        Ok(value)
    }
}

fn resolve_date(raw: &str, today: NaiveDate) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return today.format(DATE_FORMAT).to_string();
    }
    if NaiveDate::parse_from_str(raw, DATE_FORMAT).is_err() {
        tracing::warn!(date = raw, "date is not YYYY-MM-DD; it will sort lexically");
    }
    raw.to_string()
}
