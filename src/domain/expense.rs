use serde::{Deserialize, Serialize};

use super::Cents;

pub type ExpenseId = u64;

/// A single recorded spending event.
/// Records are immutable once the ledger has assigned their id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    /// Calendar date, expected as `YYYY-MM-DD`; compared lexically
    pub date: String,
    /// Amount in cents
    pub amount: Cents,
    /// Free-form label, case-sensitive
    pub category: String,
    pub description: String,
}

impl ExpenseRecord {
    pub(crate) fn new(
        id: ExpenseId,
        date: String,
        amount: Cents,
        category: String,
        description: String,
    ) -> Self {
        Self {
            id,
            date,
            amount,
            category,
            description,
        }
    }

    /// Key used by the chronological view: date first, id breaks ties.
    pub(crate) fn date_key(&self) -> (String, ExpenseId) {
        (self.date.clone(), self.id)
    }
}
