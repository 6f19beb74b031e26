use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::str::FromStr;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::application::TrackerService;
use crate::domain::{format_cents, Cents};

use super::Renderer;

const BANNER: &str = "Welcome to Pennywise, the student expense minimizer!";

/// Entries of the main menu, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddExpense,
    AddPrice,
    CheapestStore,
    ByCategory,
    ByDate,
    Summary,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::AddExpense,
        MenuChoice::AddPrice,
        MenuChoice::CheapestStore,
        MenuChoice::ByCategory,
        MenuChoice::ByDate,
        MenuChoice::Summary,
        MenuChoice::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::AddExpense => "Add New Expense",
            MenuChoice::AddPrice => "Add Price Data (for Minimizer)",
            MenuChoice::CheapestStore => "Find Cheapest Store for an Item",
            MenuChoice::ByCategory => "Show Expenses by Category",
            MenuChoice::ByDate => "Show All Expenses (Sorted by Date)",
            MenuChoice::Summary => "Show Spending Summary",
            MenuChoice::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidChoice {
    #[error("Invalid input. Please enter a number.")]
    NotANumber,

    #[error("Invalid choice. Please try again.")]
    OutOfRange,
}

impl FromStr for MenuChoice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: i64 = s.trim().parse().map_err(|_| InvalidChoice::NotANumber)?;
        usize::try_from(number)
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| MenuChoice::ALL.get(index).copied())
            .ok_or(InvalidChoice::OutOfRange)
    }
}

/// Options the session is started with.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub renderer: Renderer,
    /// Skip the banner, menu and prompts
    pub quiet: bool,
}

/// Interactive menu loop over any line-based input and any output.
///
/// The session ends on the exit choice or when input runs out, at any prompt.
pub struct Session<'a, R, W> {
    service: &'a mut TrackerService,
    input: R,
    output: W,
    options: SessionOptions,
}

type Step = ControlFlow<()>;

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        service: &'a mut TrackerService,
        input: R,
        output: W,
        options: SessionOptions,
    ) -> Self {
        Self {
            service,
            input,
            output,
            options,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        if !self.options.quiet {
            writeln!(self.output, "{}", BANNER)?;
        }

        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                tracing::debug!("input closed, ending session");
                break;
            };

            let choice = match line.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(err) => {
                    writeln!(self.output, "{}", err)?;
                    continue;
                }
            };
            tracing::debug!(?choice, "menu choice");

            let step = match choice {
                MenuChoice::AddExpense => self.add_expense()?,
                MenuChoice::AddPrice => self.add_price()?,
                MenuChoice::CheapestStore => self.cheapest_store()?,
                MenuChoice::ByCategory => self.by_category()?,
                MenuChoice::ByDate => self.by_date()?,
                MenuChoice::Summary => self.summary()?,
                MenuChoice::Exit => {
                    if !self.options.quiet {
                        writeln!(self.output, "Goodbye!")?;
                    }
                    Step::Break(())
                }
            };
            if step.is_break() {
                break;
            }
        }

        self.output.flush().context("Failed to flush output")?;
        Ok(())
    }

    fn add_expense(&mut self) -> Result<Step> {
        let Some(date) = self.ask("Enter date (YYYY-MM-DD, blank for today): ")? else {
            return Ok(Step::Break(()));
        };
        let Some(amount) = self.ask_amount("Enter amount: ")? else {
            return Ok(Step::Break(()));
        };
        let Some(category) = self.ask("Enter category (e.g., Food, Transport, Books): ")? else {
            return Ok(Step::Break(()));
        };
        let Some(description) = self.ask("Enter description: ")? else {
            return Ok(Step::Break(()));
        };

        match self
            .service
            .record_expense(&date, amount, &category, &description)
        {
            Ok(id) => {
                let message = format!(
                    "\nSuccess: Added expense '{}' (#{}).",
                    description.trim(),
                    id
                );
                self.options.renderer.notice(&mut self.output, &message)?;
            }
            Err(err) => writeln!(self.output, "Error: {}", err)?,
        }
        Ok(Step::Continue(()))
    }

    fn add_price(&mut self) -> Result<Step> {
        let Some(item) = self.ask("Enter item name (e.g., Milk 1L): ")? else {
            return Ok(Step::Break(()));
        };
        let Some(store) = self.ask("Enter store name: ")? else {
            return Ok(Step::Break(()));
        };
        let Some(price) = self.ask_amount("Enter price: ")? else {
            return Ok(Step::Break(()));
        };

        match self.service.record_price(&item, &store, price) {
            Ok(previous) => {
                let mut message = format!(
                    "\nSuccess: Added price for '{}' at '{}'.",
                    item.trim(),
                    store.trim()
                );
                if let Some(old) = previous {
                    message.push_str(&format!(" Replaced previous price {}.", format_cents(old)));
                }
                self.options.renderer.notice(&mut self.output, &message)?;
            }
            Err(err) => writeln!(self.output, "Error: {}", err)?,
        }
        Ok(Step::Continue(()))
    }

    fn cheapest_store(&mut self) -> Result<Step> {
        let Some(item) = self.ask("Enter item name to check: ")? else {
            return Ok(Step::Break(()));
        };

        let comparison = self.service.price_comparison(&item);
        self.options
            .renderer
            .price_comparison(&mut self.output, item.trim(), comparison.as_ref())?;
        Ok(Step::Continue(()))
    }

    fn by_category(&mut self) -> Result<Step> {
        let Some(category) = self.ask("Enter category to show: ")? else {
            return Ok(Step::Break(()));
        };

        let expenses = self.service.expenses_in_category(&category);
        self.options
            .renderer
            .category_listing(&mut self.output, category.trim(), &expenses)?;
        Ok(Step::Continue(()))
    }

    fn by_date(&mut self) -> Result<Step> {
        let expenses = self.service.expenses_by_date();
        self.options.renderer.date_listing(&mut self.output, &expenses)?;
        Ok(Step::Continue(()))
    }

    fn summary(&mut self) -> Result<Step> {
        match self.service.category_report() {
            Ok(report) => self
                .options
                .renderer
                .category_report(&mut self.output, &report)?,
            Err(err) => writeln!(self.output, "Error: {}", err)?,
        }
        Ok(Step::Continue(()))
    }

    fn print_menu(&mut self) -> Result<()> {
        if self.options.quiet {
            return Ok(());
        }
        writeln!(self.output)?;
        writeln!(self.output, " Pennywise Expense Minimizer ")?;
        for (number, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", number + 1, choice.label())?;
        }
        write!(self.output, "Enter your choice: ")?;
        self.output.flush()?;
        Ok(())
    }

    /// Ask for an amount until the answer parses.
    fn ask_amount(&mut self, prompt: &str) -> Result<Option<Cents>> {
        loop {
            let Some(raw) = self.ask(prompt)? else {
                return Ok(None);
            };
            match TrackerService::parse_amount(&raw) {
                Ok(cents) => return Ok(Some(cents)),
                Err(err) => {
                    tracing::debug!(%err, "rejected amount");
                    writeln!(self.output, "{}. Please enter a number.", err)?;
                }
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        if !self.options.quiet {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;
        }
        self.read_line()
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
