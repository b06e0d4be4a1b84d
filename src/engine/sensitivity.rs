use crate::engine::breakeven::resolve_breakeven;
use crate::engine::{CostSnapshot, ScenarioOutcome, SensitivityResult, SolutionCost, HORIZON_MONTHS};

const VARIATION: f64 = 0.2;

/// Perturbs monthly savings by ±20%. The pessimistic case always moves
/// toward the worse outcome, including when base savings are already negative.
///
/// The horizon total compares steady-state running costs plus the upfront
/// investment; it does not re-charge a build delay at baseline rate.
pub fn analyze_sensitivity(baseline: &CostSnapshot, solution: &SolutionCost) -> SensitivityResult {
    let horizon = f64::from(HORIZON_MONTHS);
    let base_monthly = baseline.monthly - solution.cost.monthly;
    let base_total =
        baseline.monthly * horizon - (solution.cost.monthly * horizon + solution.cost.initial);
    let variation_factor = if base_monthly >= 0.0 {
        VARIATION
    } else {
        -VARIATION
    };

    let scenario = |factor: f64| {
        let monthly = base_monthly * factor;
        ScenarioOutcome {
            monthly,
            total: base_total * factor,
            breakeven: resolve_breakeven(solution.delay_months, solution.cost.initial, monthly),
        }
    };

    SensitivityResult {
        base: scenario(1.0),
        pessimistic: scenario(1.0 - variation_factor),
        optimistic: scenario(1.0 + variation_factor),
    }
}
