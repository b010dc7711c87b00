use chrono::NaiveDate;
use finvis_core::Ledger;
use finvis_finance::{
    Frequency, RecurringConfig, RecurringTemplate, SummationMode, build_chart, expand, summarize,
};
use finvis_ingest::{CsvParser, SkipReason, write_statement};
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join("sample_statement.csv")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn imported_ledger() -> Ledger {
    let report = CsvParser::default().parse_file(fixture_path()).unwrap();
    Ledger::from_transactions(report.transactions).unwrap()
}

#[test]
fn statement_import_report() {
    let report = CsvParser::default().parse_file(fixture_path()).unwrap();
    assert!(report.header_skipped);
    assert_eq!(report.transactions.len(), 8);
    assert_eq!(report.ambiguous_dates, 1);

    let reasons: Vec<_> = report.skipped.iter().map(|s| (s.row, &s.reason)).collect();
    assert_eq!(reasons.len(), 2);
    assert_eq!(reasons[0], (6, &SkipReason::ZeroAmount));
    assert!(matches!(reasons[1], (7, SkipReason::InvalidDate(_))));

    let bookstore = report
        .transactions
        .iter()
        .find(|t| t.description == "Bookstore")
        .unwrap();
    // month-first wins for 03/02/2024
    assert_eq!(bookstore.date, date(2024, 3, 2));
    assert_eq!(bookstore.amount, -32.0);
}

#[test]
fn summary_over_imported_statement() {
    let ledger = imported_ledger();
    let s = summarize(ledger.transactions());

    assert!(close(s.total_income, 4842.5));
    assert!(close(s.total_expenses, 1703.19));
    assert!(close(s.net_income, 4842.5 - 1703.19));
    // January, February, March
    assert!(close(s.avg_monthly_income, 4842.5 / 3.0));
    assert!(close(s.avg_yearly_expenses, 1703.19));

    let card = s.card(SummationMode::Monthly);
    assert!(close(card.net, s.avg_monthly_net));
}

#[test]
fn chart_over_imported_statement() {
    let ledger = imported_ledger();
    let series = build_chart(ledger.transactions(), date(2024, 3, 15));

    assert_eq!(series.num_months, 3);
    assert_eq!(series.domain, (0, 300));
    let ticks: Vec<_> = series.ticks.iter().map(|t| (t.value, t.label.as_str())).collect();
    assert_eq!(ticks, vec![(0, "Jan"), (100, "Feb"), (200, "Mar")]);

    let totals: Vec<_> = series
        .points
        .iter()
        .filter(|p| p.is_month_total)
        .map(|p| p.label.as_str())
        .collect();
    // March is still in progress
    assert_eq!(totals, vec!["Jan Total", "Feb Total"]);
    assert_eq!(series.points.len(), 10);

    let last = series.last().unwrap();
    assert_eq!(last.label, "Mar 3");
    assert!(close(last.income, 4842.5));
    assert!(close(last.expenses, 1703.19));
}

#[test]
fn recurring_schedule_added_and_removed_as_group() {
    let ledger = imported_ledger();
    let template = RecurringTemplate::new(date(2024, 1, 10), "Gym", -30.0);
    let batch = expand(&template, &RecurringConfig::new(Frequency::Monthly, 3)).unwrap();
    let member = batch[1].id.clone();

    let with_gym = ledger.with_transactions(batch).unwrap();
    assert_eq!(with_gym.len(), ledger.len() + 3);
    assert!(close(
        summarize(with_gym.transactions()).total_expenses,
        1703.19 + 90.0
    ));

    let without_gym = with_gym.without(&member).unwrap();
    assert_eq!(without_gym, ledger);
}

#[test]
fn export_reimports_to_same_ledger_contents() {
    let ledger = imported_ledger();
    let mut buf = Vec::new();
    write_statement(ledger.transactions(), &mut buf).unwrap();

    let report = CsvParser::default().parse_bytes(&buf).unwrap();
    let before: Vec<_> = ledger
        .iter()
        .map(|t| (t.date, t.description.clone(), t.amount))
        .collect();
    let after: Vec<_> = report
        .transactions
        .iter()
        .map(|t| (t.date, t.description.clone(), t.amount))
        .collect();
    assert_eq!(before, after);
}
