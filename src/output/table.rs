use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::engine::{CalculationResult, MonthlyDataPoint, SensitivityResult};
use crate::report::{describe_breakeven, format_money, ComparisonRow, StrategyRanking};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn savings_cell(value: f64) -> Cell {
    let cell = Cell::new(format_money(value));
    if value >= 0.0 {
        cell.fg(Color::Green)
    } else {
        cell.fg(Color::Red)
    }
}

pub fn render_summary_table(result: &CalculationResult) -> String {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        "Model".to_string(),
        result.model.to_string(),
    ]);
    table.add_row(vec![
        "Solution".to_string(),
        result.solution.kind.to_string(),
    ]);
    table.add_row(vec![
        "Baseline monthly".to_string(),
        format_money(result.baseline.monthly),
    ]);
    table.add_row(vec![
        "Solution monthly".to_string(),
        format_money(result.solution.cost.monthly),
    ]);
    table.add_row(vec![
        "Initial investment".to_string(),
        format_money(result.solution.cost.initial),
    ]);
    table.add_row(Row::from(vec![
        Cell::new("Monthly savings"),
        savings_cell(result.monthly),
    ]));
    table.add_row(Row::from(vec![
        Cell::new("Break-even"),
        Cell::new(describe_breakeven(result.breakeven)),
    ]));
    let viable = if result.solution.is_viable { "YES" } else { "NO" };
    table.add_row(Row::from(vec![
        Cell::new("Viable within horizon"),
        if result.solution.is_viable {
            Cell::new(viable).fg(Color::Green)
        } else {
            Cell::new(viable).fg(Color::Red)
        },
    ]));

    let mut out = table.to_string();
    out.push('\n');
    out.push_str(&render_breakdown_table(result));
    out
}

fn render_breakdown_table(result: &CalculationResult) -> String {
    let mut table = new_table();
    table.set_header(vec!["Cost component", "Baseline", "Solution"]);
    for (key, value) in &result.baseline.breakdown {
        table.add_row(vec![key.clone(), format_money(*value), "-".to_string()]);
    }
    for (key, value) in &result.solution.cost.breakdown {
        table.add_row(vec![key.clone(), "-".to_string(), format_money(*value)]);
    }
    for (key, value) in &result.solution.investment {
        table.add_row(vec![
            format!("{key} (one-time)"),
            "-".to_string(),
            format_money(*value),
        ]);
    }
    table.to_string()
}

pub fn render_projection_table(data: &[MonthlyDataPoint]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Month",
        "Baseline (cum.)",
        "Solution (cum.)",
        "Savings (cum.)",
        "Savings (month)",
    ]);
    for point in data {
        table.add_row(Row::from(vec![
            Cell::new(point.month),
            Cell::new(format_money(point.baseline)),
            Cell::new(format_money(point.solution)),
            savings_cell(point.savings),
            Cell::new(format_money(point.monthly_savings)),
        ]));
    }
    table.to_string()
}

pub fn render_sensitivity_table(result: &SensitivityResult) -> String {
    let mut table = new_table();
    table.set_header(vec!["Scenario", "Monthly savings", "Total savings", "Break-even"]);
    for (label, outcome) in [
        ("Pessimistic", &result.pessimistic),
        ("Base", &result.base),
        ("Optimistic", &result.optimistic),
    ] {
        table.add_row(Row::from(vec![
            Cell::new(label),
            savings_cell(outcome.monthly),
            savings_cell(outcome.total),
            Cell::new(describe_breakeven(outcome.breakeven)),
        ]));
    }
    table.to_string()
}

pub fn render_comparison_table(rows: &[ComparisonRow], breakeven: Option<u32>) -> String {
    let mut table = new_table();
    table.set_header(vec!["", "Baseline", "Solution", "Difference"]);
    for row in rows {
        table.add_row(Row::from(vec![
            Cell::new(&row.label),
            Cell::new(format_money(row.baseline)),
            Cell::new(format_money(row.solution)),
            savings_cell(row.difference),
        ]));
    }
    table.add_row(vec![
        "Break-even".to_string(),
        "-".to_string(),
        "-".to_string(),
        describe_breakeven(breakeven),
    ]);
    table.to_string()
}

pub fn render_ranking_table(rankings: &[StrategyRanking]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Rank",
        "Solution",
        "Monthly savings",
        "24-month savings",
        "Break-even",
        "Note",
    ]);
    for ranking in rankings {
        table.add_row(vec![
            ranking
                .rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
            ranking.solution.to_string(),
            ranking
                .monthly_savings
                .map(format_money)
                .unwrap_or_else(|| "-".to_string()),
            ranking
                .total_savings
                .map(format_money)
                .unwrap_or_else(|| "-".to_string()),
            if ranking.error.is_some() {
                "-".to_string()
            } else {
                describe_breakeven(ranking.breakeven)
            },
            ranking.error.clone().unwrap_or_default(),
        ]);
    }
    table.to_string()
}
