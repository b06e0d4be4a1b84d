use anyhow::Result;

use crate::engine::{MonthlyDataPoint, SensitivityResult};
use crate::report::{ComparisonRow, StrategyRanking};

pub fn projection_to_csv(data: &[MonthlyDataPoint]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "month",
        "baseline_cumulative",
        "solution_cumulative",
        "savings_cumulative",
        "savings_month",
    ])?;
    for point in data {
        writer.write_record([
            point.month.to_string(),
            format!("{:.2}", point.baseline),
            format!("{:.2}", point.solution),
            format!("{:.2}", point.savings),
            format!("{:.2}", point.monthly_savings),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn sensitivity_to_csv(result: &SensitivityResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["scenario", "monthly_savings", "total_savings", "breakeven_month"])?;
    for (label, outcome) in [
        ("pessimistic", &result.pessimistic),
        ("base", &result.base),
        ("optimistic", &result.optimistic),
    ] {
        writer.write_record([
            label.to_string(),
            format!("{:.2}", outcome.monthly),
            format!("{:.2}", outcome.total),
            outcome
                .breakeven
                .map(|m| m.to_string())
                .unwrap_or_default(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

/// Comparison rows, then a trailing `break_even` record whose month sits in
/// the difference column (blank when the solution never pays back).
pub fn comparison_to_csv(rows: &[ComparisonRow], breakeven: Option<u32>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["item", "baseline", "solution", "difference"])?;
    for row in rows {
        writer.write_record([
            row.label.clone(),
            format!("{:.2}", row.baseline),
            format!("{:.2}", row.solution),
            format!("{:.2}", row.difference),
        ])?;
    }
    writer.write_record([
        "break_even".to_string(),
        String::new(),
        String::new(),
        breakeven.map(|m| m.to_string()).unwrap_or_default(),
    ])?;
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn ranking_to_csv(rankings: &[StrategyRanking]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "rank",
        "solution",
        "monthly_savings",
        "total_savings",
        "breakeven_month",
        "viable",
        "error",
    ])?;
    for ranking in rankings {
        writer.write_record([
            ranking.rank.map(|r| r.to_string()).unwrap_or_default(),
            ranking.solution.as_slug().to_string(),
            ranking
                .monthly_savings
                .map(|v| format!("{v:.2}"))
                .unwrap_or_default(),
            ranking
                .total_savings
                .map(|v| format!("{v:.2}"))
                .unwrap_or_default(),
            ranking.breakeven.map(|m| m.to_string()).unwrap_or_default(),
            ranking.is_viable.to_string(),
            ranking.error.clone().unwrap_or_default(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
