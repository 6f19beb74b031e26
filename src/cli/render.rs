use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::application::{CategoryReport, PriceComparison};
use crate::domain::{format_cents, Cents, ExpenseRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable text
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Comma-separated values with a header row
    Csv,
}

/// Writes query results in the configured output format.
#[derive(Debug, Clone)]
pub struct Renderer {
    format: OutputFormat,
    currency: String,
}

impl Renderer {
    pub fn new(format: OutputFormat, currency: impl Into<String>) -> Self {
        Self {
            format,
            currency: currency.into(),
        }
    }

    /// Currency symbol followed by the amount, right-aligned to `width`.
    pub fn money(&self, cents: Cents, width: usize) -> String {
        format!("{} {:>width$}", self.currency, format_cents(cents))
    }

    /// Confirmation text. Only table output carries it so JSON and CSV
    /// streams stay machine-readable.
    pub fn notice<W: Write>(&self, out: &mut W, message: &str) -> Result<()> {
        if self.format == OutputFormat::Table {
            writeln!(out, "{}", message)?;
        }
        Ok(())
    }

    pub fn category_listing<W: Write>(
        &self,
        out: &mut W,
        category: &str,
        expenses: &[&ExpenseRecord],
    ) -> Result<()> {
        match self.format {
            OutputFormat::Json => write_json(out, &expenses),
            OutputFormat::Csv => self.write_expenses_csv(out, expenses),
            OutputFormat::Table => {
                writeln!(out)?;
                writeln!(out, "--- Expenses for Category: {} ---", category)?;
                if expenses.is_empty() {
                    writeln!(out, "No expenses found for this category.")?;
                }
                for expense in expenses {
                    writeln!(
                        out,
                        "{} | {} | {}",
                        expense.date,
                        self.money(expense.amount, 7),
                        expense.description
                    )?;
                }
                Ok(())
            }
        }
    }

    pub fn date_listing<W: Write>(&self, out: &mut W, expenses: &[&ExpenseRecord]) -> Result<()> {
        match self.format {
            OutputFormat::Json => write_json(out, &expenses),
            OutputFormat::Csv => self.write_expenses_csv(out, expenses),
            OutputFormat::Table => {
                writeln!(out)?;
                writeln!(out, "--- All Expenses (Sorted by Date) ---")?;
                if expenses.is_empty() {
                    writeln!(out, "No expenses to show.")?;
                }
                for expense in expenses {
                    writeln!(
                        out,
                        "{} | {:<10} | {} | {}",
                        expense.date,
                        expense.category,
                        self.money(expense.amount, 7),
                        expense.description
                    )?;
                }
                Ok(())
            }
        }
    }

    pub fn category_report<W: Write>(&self, out: &mut W, report: &CategoryReport) -> Result<()> {
        match self.format {
            OutputFormat::Json => write_json(out, report),
            OutputFormat::Csv => {
                let mut csv_writer = csv::Writer::from_writer(out);
                csv_writer.write_record(["category", "total", "count", "average", "percentage"])?;
                for cat in &report.categories {
                    csv_writer.write_record([
                        cat.category.clone(),
                        format_cents(cat.total),
                        cat.count.to_string(),
                        format_cents(cat.average),
                        format!("{:.2}", cat.percentage),
                    ])?;
                }
                csv_writer.flush()?;
                Ok(())
            }
            OutputFormat::Table => {
                writeln!(out)?;
                writeln!(out, "--- Spending Summary by Category ---")?;
                if report.categories.is_empty() {
                    writeln!(out, "No expenses to summarize.")?;
                    return Ok(());
                }
                for cat in &report.categories {
                    writeln!(
                        out,
                        "  - {:<12}: {}  ({} expense{}, {:.1}%)",
                        cat.category,
                        self.money(cat.total, 0),
                        cat.count,
                        if cat.count == 1 { "" } else { "s" },
                        cat.percentage
                    )?;
                }
                writeln!(out, "{}", "-".repeat(38))?;
                writeln!(out, "  - {:<12}: {}", "TOTAL", self.money(report.total, 0))?;
                Ok(())
            }
        }
    }

    pub fn price_comparison<W: Write>(
        &self,
        out: &mut W,
        item: &str,
        comparison: Option<&PriceComparison>,
    ) -> Result<()> {
        match self.format {
            OutputFormat::Json => write_json(out, &comparison),
            OutputFormat::Csv => {
                let mut csv_writer = csv::Writer::from_writer(out);
                csv_writer.write_record(["item", "store", "price", "cheapest"])?;
                if let Some(comparison) = comparison {
                    for quote in &comparison.quotes {
                        let cheapest = quote.store == comparison.cheapest.store;
                        csv_writer.write_record([
                            comparison.item.as_str(),
                            quote.store.as_str(),
                            format_cents(quote.price).as_str(),
                            if cheapest { "yes" } else { "no" },
                        ])?;
                    }
                }
                csv_writer.flush()?;
                Ok(())
            }
            OutputFormat::Table => {
                writeln!(out)?;
                writeln!(out, "--- Price Check for: {} ---", item)?;
                let Some(comparison) = comparison else {
                    writeln!(out, "Sorry, no price data found for '{}'.", item)?;
                    return Ok(());
                };
                for quote in &comparison.quotes {
                    writeln!(out, "  - {:<15}: {}", quote.store, self.money(quote.price, 0))?;
                }
                writeln!(
                    out,
                    "==> The cheapest store is '{}' at {} <==",
                    comparison.cheapest.store,
                    self.money(comparison.cheapest.price, 0)
                )?;
                if comparison.savings > 0 {
                    writeln!(
                        out,
                        "    Saves {} over the most expensive store.",
                        self.money(comparison.savings, 0)
                    )?;
                }
                Ok(())
            }
        }
    }

    fn write_expenses_csv<W: Write>(&self, out: &mut W, expenses: &[&ExpenseRecord]) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(out);
        csv_writer.write_record(["id", "date", "amount", "category", "description"])?;
        for expense in expenses {
            csv_writer.write_record([
                expense.id.to_string(),
                expense.date.clone(),
                format_cents(expense.amount),
                expense.category.clone(),
                expense.description.clone(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
