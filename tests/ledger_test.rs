mod common;

use anyhow::Result;
use common::scenario_service;
use pennywise::application::{AppError, TrackerService};
use pennywise::domain::{ExpenseLedger, TotalOverflow};

#[test]
fn test_ids_match_insertion_count() {
    let mut ledger = ExpenseLedger::new();
    let categories = ["Food", "Rent", "Food", "Books", "Transport", "Rent"];

    for (n, category) in categories.iter().enumerate() {
        let id = ledger.add_expense("2024-05-01", 100, *category, "entry");
        assert_eq!(id, (n + 1) as u64);
    }

    let ids: Vec<u64> = ledger.list_all_by_date().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_by_date_is_sorted_by_date_then_id() {
    let mut ledger = ExpenseLedger::new();
    let dates = [
        "2024-03-01",
        "2023-12-31",
        "2024-03-01",
        "2024-01-15",
        "2023-12-31",
        "2024-02-29",
    ];
    for date in dates {
        ledger.add_expense(date, 100, "Misc", date);
    }

    let listed = ledger.list_all_by_date();
    assert_eq!(listed.len(), dates.len());
    for pair in listed.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(a.date < b.date || (a.date == b.date && a.id < b.id));
    }
    assert_eq!(listed[0].id, 2);
    assert_eq!(listed[1].id, 5);
}

#[test]
fn test_scenario_listing_and_totals() -> Result<()> {
    let service = scenario_service()?;

    let by_date: Vec<&str> = service
        .expenses_by_date()
        .iter()
        .map(|r| r.description.as_str())
        .collect();
    assert_eq!(by_date, vec!["Snack", "Lunch", "Bus"]);

    let report = service.category_report()?;
    assert_eq!(report.categories.len(), 2);
    assert_eq!(report.categories[0].category, "Food");
    assert_eq!(report.categories[0].total, 15000);
    assert_eq!(report.categories[0].count, 2);
    assert_eq!(report.categories[0].average, 7500);
    assert_eq!(report.categories[1].category, "Transport");
    assert_eq!(report.categories[1].total, 20000);
    assert_eq!(report.total, 35000);
    assert_eq!(report.expense_count, 3);

    let share: f64 = report.categories.iter().map(|c| c.percentage).sum();
    assert!((share - 100.0).abs() < 1e-9);

    Ok(())
}

#[test]
fn test_category_listing_matches_exactly() -> Result<()> {
    let mut service = scenario_service()?;
    service.record_expense("2024-01-02", 1500, "Food", "Tea")?;

    let food: Vec<(u64, &str)> = service
        .expenses_in_category("Food")
        .iter()
        .map(|r| (r.id, r.description.as_str()))
        .collect();
    assert_eq!(food, vec![(1, "Lunch"), (2, "Snack"), (4, "Tea")]);

    assert!(service.expenses_in_category("Books").is_empty());
    assert!(service.expenses_in_category("FOOD").is_empty());

    Ok(())
}

#[test]
fn test_totals_are_exact_in_cents() -> Result<()> {
    let mut service = TrackerService::new();
    // 0.10 a thousand times drifts with binary floats
    for _ in 0..1000 {
        service.record_expense("2024-06-01", 10, "Coffee", "refill")?;
    }
    service.record_expense("2024-06-02", 1, "Snacks", "gum")?;

    let report = service.category_report()?;
    assert_eq!(report.total, 10001);
    let per_category: i64 = report.categories.iter().map(|c| c.total).sum();
    assert_eq!(per_category, report.total);

    Ok(())
}

#[test]
fn test_categories_are_ordered_lexically() -> Result<()> {
    let mut service = TrackerService::new();
    for category in ["rent", "Transport", "Books", "apples", "Food"] {
        service.record_expense("2024-01-01", 100, category, "x")?;
    }

    let order: Vec<String> = service
        .category_report()?
        .categories
        .into_iter()
        .map(|c| c.category)
        .collect();
    assert_eq!(order, vec!["Books", "Food", "Transport", "apples", "rent"]);

    Ok(())
}

#[test]
fn test_record_expense_validation() -> Result<()> {
    let mut service = TrackerService::new();

    assert_eq!(
        service.record_expense("2024-01-01", 100, "  ", "Lunch"),
        Err(AppError::MissingField("Category"))
    );
    assert_eq!(
        service.record_expense("2024-01-01", 100, "Food", ""),
        Err(AppError::MissingField("Description"))
    );
    assert!(service.ledger().is_empty());

    // Negative amounts are accepted as given
    let id = service.record_expense("2024-01-01", -500, " Refunds ", " Returned book ")?;
    let record = service.ledger().get(id).unwrap();
    assert_eq!(record.amount, -500);
    assert_eq!(record.category, "Refunds");
    assert_eq!(record.description, "Returned book");

    Ok(())
}

#[test]
fn test_blank_date_defaults_to_an_iso_date() -> Result<()> {
    let mut service = TrackerService::new();
    let id = service.record_expense("", 100, "Food", "Lunch")?;

    let date = &service.ledger().get(id).unwrap().date;
    assert!(chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());

    Ok(())
}

#[test]
fn test_totals_past_the_cents_range_are_reported() -> Result<()> {
    let mut service = TrackerService::new();
    let amount = TrackerService::parse_amount("90000000000000000")?;
    service.record_expense("2024-01-01", amount, "Food", "Feast")?;
    service.record_expense("2024-01-02", amount, "Food", "Banquet")?;

    assert_eq!(
        service.category_report(),
        Err(AppError::TotalOverflow(TotalOverflow {
            category: "Food".into()
        }))
    );

    // Listings stay available
    assert_eq!(service.expenses_by_date().len(), 2);

    Ok(())
}

#[test]
fn test_grand_total_past_the_cents_range_is_reported() -> Result<()> {
    let mut service = TrackerService::new();
    let amount = TrackerService::parse_amount("90000000000000000")?;
    service.record_expense("2024-01-01", amount, "Food", "Feast")?;
    service.record_expense("2024-01-02", amount, "Rent", "Castle")?;

    let err = service.category_report().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot summarize spending: total of TOTAL exceeds the largest representable amount"
    );

    Ok(())
}
