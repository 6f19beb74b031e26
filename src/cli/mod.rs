use std::io;

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use crate::application::TrackerService;

mod render;
mod session;

pub use render::*;
pub use session::*;

/// Pennywise - Student Expense Minimizer
#[derive(Parser, Debug)]
#[command(name = "pennywise")]
#[command(about = "Track everyday expenses and find the cheapest store for an item")]
#[command(version)]
pub struct Cli {
    /// Currency symbol printed before amounts
    #[arg(short, long, env = "PENNYWISE_CURRENCY", default_value = "Rs.")]
    pub currency: String,

    /// Output format for listings and reports
    #[arg(
        short,
        long,
        env = "PENNYWISE_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Table
    )]
    pub format: OutputFormat,

    /// Hide the banner, menu and prompts (for piped input)
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log filter from `RUST_LOG`, falling back to the `-v` count.
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = match self.verbose {
                0 => "warn",
                1 => "info",
                _ => "debug",
            };
            EnvFilter::new(format!("pennywise={level}"))
        })
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            renderer: Renderer::new(self.format, self.currency.clone()),
            quiet: self.quiet,
        }
    }

    pub fn run(self) -> Result<()> {
        let mut service = TrackerService::new();
        tracing::info!(format = ?self.format, quiet = self.quiet, "starting session");

        let stdin = io::stdin();
        let stdout = io::stdout();
        Session::new(
            &mut service,
            stdin.lock(),
            stdout.lock(),
            self.session_options(),
        )
        .run()?;

        tracing::info!(
            expenses = service.ledger().len(),
            items = service.catalog().len(),
            "session finished"
        );
        Ok(())
    }
}
