// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::io::Cursor;

use anyhow::Result;
use pennywise::application::TrackerService;
use pennywise::cli::{OutputFormat, Renderer, Session, SessionOptions};

/// Service preloaded with the three-expense scenario:
/// Lunch and Bus share a date, Snack is two days earlier.
pub fn scenario_service() -> Result<TrackerService> {
    let mut service = TrackerService::new();
    service.record_expense("2024-01-05", 10000, "Food", "Lunch")?;
    service.record_expense("2024-01-03", 5000, "Food", "Snack")?;
    service.record_expense("2024-01-05", 20000, "Transport", "Bus")?;
    Ok(service)
}

/// Feed `script` to a session over `service` and return everything it printed.
pub fn run_session(
    service: &mut TrackerService,
    script: &str,
    format: OutputFormat,
    quiet: bool,
) -> Result<String> {
    let mut output = Vec::new();
    let options = SessionOptions {
        renderer: Renderer::new(format, "Rs."),
        quiet,
    };
    Session::new(service, Cursor::new(script), &mut output, options).run()?;
    Ok(String::from_utf8(output)?)
}

/// Quiet table session, the common case for assertions on rendered text.
pub fn run_quiet(service: &mut TrackerService, script: &str) -> Result<String> {
    run_session(service, script, OutputFormat::Table, true)
}
