use crate::engine::{CostSnapshot, MonthlyDataPoint, SolutionCost, HORIZON_MONTHS};

/// Cumulative solution cost after `month` months: the upfront investment,
/// baseline cost while the solution is still being built or transitioned,
/// then the solution's own monthly cost.
pub fn cumulative_solution_cost(baseline: &CostSnapshot, solution: &SolutionCost, month: u32) -> f64 {
    let elapsed = f64::from(month);
    let delay = solution.delay_months.max(0.0);
    let during_delay = elapsed.min(delay);
    let after_delay = (elapsed - delay).max(0.0);
    solution.cost.initial + baseline.monthly * during_delay + solution.cost.monthly * after_delay
}

pub fn cumulative_savings(baseline: &CostSnapshot, solution: &SolutionCost, month: u32) -> f64 {
    baseline.monthly * f64::from(month) - cumulative_solution_cost(baseline, solution, month)
}

pub fn generate_projection(baseline: &CostSnapshot, solution: &SolutionCost) -> Vec<MonthlyDataPoint> {
    let mut previous_savings = -solution.cost.initial;
    let mut data = Vec::with_capacity(HORIZON_MONTHS as usize);
    for month in 1..=HORIZON_MONTHS {
        let baseline_total = baseline.monthly * f64::from(month);
        let solution_total = cumulative_solution_cost(baseline, solution, month);
        let savings = baseline_total - solution_total;
        data.push(MonthlyDataPoint {
            month,
            baseline: baseline_total,
            solution: solution_total,
            savings,
            monthly_savings: savings - previous_savings,
        });
        previous_savings = savings;
    }
    data
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::generate_projection;
    use crate::engine::breakeven::{first_recovered_month, resolve_breakeven};
    use crate::engine::{CostSnapshot, SolutionCost, HORIZON_MONTHS};
    use crate::model::SolutionKind;

    fn baseline(monthly: f64) -> CostSnapshot {
        CostSnapshot {
            initial: 0.0,
            monthly,
            breakdown: BTreeMap::new(),
        }
    }

    fn solution(initial: f64, monthly: f64, delay_months: f64, base: f64) -> SolutionCost {
        let monthly_savings = base - monthly;
        let break_even_months = resolve_breakeven(delay_months, initial, monthly_savings);
        SolutionCost {
            kind: SolutionKind::Platform,
            cost: CostSnapshot {
                initial,
                monthly,
                breakdown: BTreeMap::new(),
            },
            investment: BTreeMap::new(),
            monthly_savings,
            break_even_months,
            is_viable: true,
            delay_months,
        }
    }

    #[test]
    fn series_covers_every_month_of_the_horizon() {
        let data = generate_projection(&baseline(1_000.0), &solution(0.0, 800.0, 0.0, 1_000.0));
        assert_eq!(data.len(), HORIZON_MONTHS as usize);
        for (idx, point) in data.iter().enumerate() {
            assert_eq!(point.month, idx as u32 + 1);
        }
        assert_eq!(data[23].baseline, 24_000.0);
    }

    #[test]
    fn baseline_keeps_running_during_build() {
        let data =
            generate_projection(&baseline(1_000.0), &solution(5_000.0, 400.0, 3.0, 1_000.0));
        assert_eq!(data[0].solution, 6_000.0);
        assert_eq!(data[2].solution, 8_000.0);
        assert_eq!(data[3].solution, 8_400.0);
        assert_eq!(data[0].monthly_savings, 0.0);
        assert_eq!(data[2].monthly_savings, 0.0);
        assert_eq!(data[3].monthly_savings, 600.0);
        assert_eq!(data[1].savings, -5_000.0);
    }

    #[test]
    fn non_delayed_solution_starts_saving_in_month_one() {
        let data =
            generate_projection(&baseline(1_000.0), &solution(2_000.0, 500.0, 0.0, 1_000.0));
        assert_eq!(data[0].solution, 2_500.0);
        assert_eq!(data[0].monthly_savings, 500.0);
        assert_eq!(data[3].savings, 0.0);
    }

    #[test]
    fn scan_agrees_with_resolver_inside_the_horizon() {
        let cases = [
            (5_000.0, 400.0, 3.0),
            (2_000.0, 500.0, 0.0),
            (10_001.0, 0.0, 0.0),
            (0.0, 900.0, 2.0),
            (1_234.5, 333.0, 2.5),
        ];
        for (initial, monthly, delay) in cases {
            let solution = solution(initial, monthly, delay, 1_000.0);
            let data = generate_projection(&baseline(1_000.0), &solution);
            assert_eq!(
                first_recovered_month(&data, delay),
                solution.break_even_months,
                "initial={initial} monthly={monthly} delay={delay}"
            );
        }
    }

    #[test]
    fn slow_payback_is_absent_from_series_but_extrapolated() {
        let solution = solution(100_000.0, 900.0, 0.0, 1_000.0);
        let data = generate_projection(&baseline(1_000.0), &solution);
        assert_eq!(first_recovered_month(&data, 0.0), None);
        assert_eq!(solution.break_even_months, Some(1_000));
    }

    #[test]
    fn costlier_solution_never_recovers() {
        let solution = solution(0.0, 1_200.0, 0.0, 1_000.0);
        let data = generate_projection(&baseline(1_000.0), &solution);
        assert_eq!(solution.break_even_months, None);
        assert!(data.iter().all(|p| p.savings < 0.0));
    }
}
