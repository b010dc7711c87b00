//! Plain-text rendering for `list`, `summary` and `chart`.

use finvis_core::Ledger;
use finvis_finance::{ChartSeries, SummationMode, Summary};

fn money(v: f64) -> String {
    if v < 0.0 {
        format!("-${:.2}", v.abs())
    } else {
        format!("${:.2}", v)
    }
}

pub fn render_list(ledger: &Ledger) -> String {
    if ledger.is_empty() {
        return "No transactions.".to_string();
    }
    let mut out = String::new();
    for t in ledger.sorted_newest_first() {
        let recurring = if t.recurring_group_id.is_some() { " (recurring)" } else { "" };
        out.push_str(&format!(
            "{}  {:>12}  {}{}  [{}]\n",
            t.iso_date(),
            money(t.amount),
            t.description,
            recurring,
            t.id
        ));
    }
    out
}

pub fn render_summary(summary: &Summary, mode: SummationMode) -> String {
    let card = summary.card(mode);
    let heading = match mode {
        SummationMode::Total => "Total",
        SummationMode::Monthly => "Average per month",
        SummationMode::Yearly => "Average per year",
    };
    format!(
        "{heading}\n  Income:   {:>12}\n  Expenses: {:>12}\n  Net:      {:>12}\n",
        money(card.income),
        money(card.expenses),
        money(card.net)
    )
}

pub fn render_chart(series: &ChartSeries) -> String {
    if series.is_empty() {
        return "Nothing to chart yet.".to_string();
    }
    let mut out = String::new();
    for p in &series.points {
        let marker = if p.is_month_total { "=" } else { " " };
        out.push_str(&format!(
            "{marker}{:>5}  {:<10}  income {:>12}  expenses {:>12}\n",
            p.index,
            p.label,
            money(p.income),
            money(p.expenses)
        ));
    }
    out
}
