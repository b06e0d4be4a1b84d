use crate::engine::projection::cumulative_solution_cost;
use crate::engine::{CalculationResult, HORIZON_MONTHS};
use crate::report::ComparisonRow;

/// Baseline vs. solution vs. difference. The horizon total goes through the
/// projection so a platform's build months are costed at baseline rate.
pub fn build_comparison(result: &CalculationResult) -> Vec<ComparisonRow> {
    let baseline = &result.baseline;
    let solution = &result.solution;
    let horizon = f64::from(HORIZON_MONTHS);

    let row = |label: &str, baseline: f64, solution: f64| ComparisonRow {
        label: label.to_string(),
        baseline,
        solution,
        difference: baseline - solution,
    };

    vec![
        row("Monthly cost", baseline.monthly, solution.cost.monthly),
        row("Annual operating cost", baseline.monthly * 12.0, solution.cost.monthly * 12.0),
        row("Initial investment", baseline.initial, solution.cost.initial),
        row(
            &format!("{HORIZON_MONTHS}-month total"),
            baseline.monthly * horizon,
            cumulative_solution_cost(baseline, solution, HORIZON_MONTHS),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::build_comparison;
    use crate::engine::calculate;
    use crate::model::{InputBag, ModelKind, SolutionKind};

    #[test]
    fn platform_total_accounts_for_build_time() {
        let inputs = InputBag::new()
            .with("team_size", 5.0)
            .with("hourly_rate", 75.0)
            .with("service_efficiency", 0.6)
            .with("operational_overhead", 0.2)
            .with("platform_cost", 100_000.0)
            .with("platform_maintenance", 5_000.0)
            .with("time_to_build", 3.0)
            .with("team_reduction", 0.3)
            .with("process_efficiency", 0.2);
        let result =
            calculate(ModelKind::Team, SolutionKind::Platform, &inputs).expect("calculation");
        let rows = build_comparison(&result);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].label, "Monthly cost");
        assert!((rows[0].difference - result.monthly).abs() < 1e-9);

        let total = &rows[3];
        assert_eq!(total.label, "24-month total");
        let expected_solution = 388_000.0 + 96_000.0 * 3.0 + 58_760.0 * 21.0;
        assert!((total.solution - expected_solution).abs() < 1e-6);
        assert!((total.difference - result.total_savings()).abs() < 1e-6);
    }
}
