pub mod comparison;
pub mod ranking;
pub mod summary;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::{CalculationResult, SensitivityResult, HORIZON_MONTHS};
use crate::model::SolutionKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonRow {
    pub label: String,
    pub baseline: f64,
    pub solution: f64,
    pub difference: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategyRanking {
    pub rank: Option<usize>,
    pub solution: SolutionKind,
    pub monthly_savings: Option<f64>,
    pub total_savings: Option<f64>,
    pub breakeven: Option<u32>,
    pub is_viable: bool,
    pub error: Option<String>,
}

/// Everything a presentation layer needs for one calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationReport {
    pub generated_at: DateTime<Utc>,
    pub result: CalculationResult,
    pub sensitivity: SensitivityResult,
    pub comparison: Vec<ComparisonRow>,
    pub summary: String,
}

impl CalculationReport {
    pub fn build(result: CalculationResult) -> Self {
        let sensitivity = result.sensitivity();
        let comparison = comparison::build_comparison(&result);
        let summary = summary::summarize(&result, &sensitivity);
        Self {
            generated_at: Utc::now(),
            result,
            sensitivity,
            comparison,
            summary,
        }
    }
}

/// Whole-dollar money with thousands separators, e.g. `-$1,200`.
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

pub fn describe_breakeven(breakeven: Option<u32>) -> String {
    match breakeven {
        None => "never".to_string(),
        Some(month) if month <= HORIZON_MONTHS => format!("month {month}"),
        Some(month) => format!("month {month} (beyond {HORIZON_MONTHS}-month horizon)"),
    }
}
