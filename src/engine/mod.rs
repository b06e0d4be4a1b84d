pub mod baseline;
pub mod breakeven;
pub mod projection;
pub mod sensitivity;
pub mod solution;

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::model::{
    InputBag, InputError, ModelKind, OperationalModel, SolutionKind, SolutionStrategy,
    UnknownModelError, UnknownSolutionError,
};

/// Standard working hours in a month.
pub const MONTHLY_HOURS: f64 = 160.0;

/// Length of every projection, in months.
pub const HORIZON_MONTHS: u32 = 24;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    #[error("invalid allocation: platform {platform_portion}% + vendor {vendor_portion}% exceeds 100%")]
    InvalidAllocation {
        platform_portion: f64,
        vendor_portion: f64,
    },
    #[error(transparent)]
    UnknownModel(#[from] UnknownModelError),
    #[error(transparent)]
    UnknownSolution(#[from] UnknownSolutionError),
    #[error(transparent)]
    Input(#[from] InputError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostSnapshot {
    pub initial: f64,
    pub monthly: f64,
    pub breakdown: BTreeMap<String, f64>,
}

impl CostSnapshot {
    pub fn breakdown_total(&self) -> f64 {
        self.breakdown.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionCost {
    #[serde(rename = "type")]
    pub kind: SolutionKind,
    #[serde(flatten)]
    pub cost: CostSnapshot,
    /// Components of `cost.initial`.
    pub investment: BTreeMap<String, f64>,
    pub monthly_savings: f64,
    /// `None` when the solution never pays for itself.
    pub break_even_months: Option<u32>,
    pub is_viable: bool,
    /// Months during which the baseline keeps running before savings start.
    pub delay_months: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyDataPoint {
    pub month: u32,
    /// Cumulative baseline cost through this month.
    pub baseline: f64,
    /// Cumulative solution cost through this month.
    pub solution: f64,
    /// Cumulative savings through this month.
    pub savings: f64,
    /// Savings realised in this month alone.
    pub monthly_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub model: ModelKind,
    pub baseline: CostSnapshot,
    pub solution: SolutionCost,
    pub monthly: f64,
    pub breakeven: Option<u32>,
    pub data: Vec<MonthlyDataPoint>,
}

impl CalculationResult {
    pub fn sensitivity(&self) -> SensitivityResult {
        sensitivity::analyze_sensitivity(&self.baseline, &self.solution)
    }

    pub fn total_savings(&self) -> f64 {
        self.data.last().map(|p| p.savings).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub monthly: f64,
    pub total: f64,
    pub breakeven: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityResult {
    pub base: ScenarioOutcome,
    pub pessimistic: ScenarioOutcome,
    pub optimistic: ScenarioOutcome,
}

/// Runs the whole pipeline for typed assumptions.
pub fn project(
    model: &OperationalModel,
    strategy: &SolutionStrategy,
) -> Result<CalculationResult, CalculationError> {
    model.validate()?;
    strategy.validate()?;
    if !matches!(strategy, SolutionStrategy::Platform(_)) && model.hourly_rate() <= 0.0 {
        return Err(InputError::Invalid {
            field: "hourly_rate",
            value: model.hourly_rate(),
            reason: "must be positive to convert cost into vendor hours",
        }
        .into());
    }

    let baseline = baseline::calculate_baseline(model);
    let solution = solution::calculate_solution(&baseline, model, strategy)?;
    let data = projection::generate_projection(&baseline, &solution);
    let monthly = baseline.monthly - solution.cost.monthly;
    let breakeven = solution.break_even_months;
    debug!(
        model = %model.kind(),
        solution = %strategy.kind(),
        baseline_monthly = baseline.monthly,
        solution_monthly = solution.cost.monthly,
        ?breakeven,
        "calculated cost projection"
    );

    Ok(CalculationResult {
        model: model.kind(),
        baseline,
        solution,
        monthly,
        breakeven,
        data,
    })
}

pub fn calculate(
    model: ModelKind,
    solution: SolutionKind,
    values: &InputBag,
) -> Result<CalculationResult, CalculationError> {
    let operational = OperationalModel::from_inputs(model, values)?;
    let strategy = SolutionStrategy::from_inputs(solution, values)?;
    project(&operational, &strategy)
}

/// Entry point for callers that still carry free-form tags.
pub fn calculate_tagged(
    model: &str,
    solution: &str,
    values: &InputBag,
) -> Result<CalculationResult, CalculationError> {
    let model = ModelKind::from_str(model)?;
    let solution = SolutionKind::from_str(solution)?;
    calculate(model, solution, values)
}

#[cfg(test)]
mod tests {
    use super::{calculate, calculate_tagged, CalculationError, HORIZON_MONTHS};
    use crate::model::{InputBag, InputError, ModelKind, SolutionKind};

    fn team_platform_inputs() -> InputBag {
        InputBag::new()
            .with("teamSize", 5.0)
            .with("hourlyRate", 75.0)
            .with("serviceEfficiency", 0.6)
            .with("operationalOverhead", 0.2)
            .with("platformCost", 100_000.0)
            .with("platformMaintenance", 5_000.0)
            .with("timeToBuild", 3.0)
            .with("teamReduction", 0.3)
            .with("processEfficiency", 0.2)
    }

    #[test]
    fn team_platform_scenario_breaks_even_in_month_fourteen() {
        let result = calculate(ModelKind::Team, SolutionKind::Platform, &team_platform_inputs())
            .expect("calculation failed");
        assert!((result.baseline.monthly - 96_000.0).abs() < 1e-6);
        assert!((result.solution.cost.monthly - 58_760.0).abs() < 1e-6);
        assert!((result.monthly - 37_240.0).abs() < 1e-6);
        assert_eq!(result.breakeven, Some(14));
        assert_eq!(result.data.len(), HORIZON_MONTHS as usize);
    }

    #[test]
    fn headline_breakeven_matches_series() {
        let result = calculate(ModelKind::Team, SolutionKind::Platform, &team_platform_inputs())
            .expect("calculation failed");
        let first = result
            .data
            .iter()
            .find(|p| p.savings >= 0.0)
            .map(|p| p.month);
        assert_eq!(first, result.breakeven);
        assert!(result.data[12].savings < 0.0);
    }

    #[test]
    fn rejects_unknown_tags() {
        let inputs = team_platform_inputs();
        assert!(matches!(
            calculate_tagged("freelance", "platform", &inputs),
            Err(CalculationError::UnknownModel(_))
        ));
        assert!(matches!(
            calculate_tagged("team", "offshore", &inputs),
            Err(CalculationError::UnknownSolution(_))
        ));
        assert!(calculate_tagged("team", "platform", &inputs).is_ok());
    }

    #[test]
    fn zero_hourly_rate_is_rejected_for_vendor_conversion() {
        let inputs = team_platform_inputs()
            .with("hourlyRate", 0.0)
            .with("vendorRate", 40.0)
            .with("managementOverhead", 0.1)
            .with("qualityImpact", 0.0)
            .with("knowledgeLoss", 0.1)
            .with("transitionTime", 2.0)
            .with("transitionCost", 10_000.0);
        let err = calculate(ModelKind::Team, SolutionKind::Outsource, &inputs)
            .expect_err("division by zero accepted");
        assert!(matches!(
            err,
            CalculationError::Input(InputError::Invalid {
                field: "hourly_rate",
                ..
            })
        ));
    }

    #[test]
    fn sensitivity_round_trip_reproduces_monthly_savings() {
        let result = calculate(ModelKind::Team, SolutionKind::Platform, &team_platform_inputs())
            .expect("calculation failed");
        let sensitivity = result.sensitivity();
        assert_eq!(sensitivity.base.monthly, result.monthly);
        assert_eq!(sensitivity.base.breakeven, result.breakeven);
        let total = 96_000.0 * 24.0 - (58_760.0 * 24.0 + 388_000.0);
        assert!((sensitivity.base.total - total).abs() < 1e-6);
        assert!((sensitivity.base.total - 505_760.0).abs() < 1e-6);
    }

    fn with_vendor_terms(inputs: InputBag, vendor_rate: f64) -> InputBag {
        inputs
            .with("vendorRate", vendor_rate)
            .with("managementOverhead", 0.15)
            .with("qualityImpact", 0.0)
            .with("knowledgeLoss", 0.2)
            .with("transitionTime", 3.0)
            .with("transitionCost", 20_000.0)
    }

    #[test]
    fn platform_without_savings_never_breaks_even() {
        let costly = team_platform_inputs().with("platformMaintenance", 50_000.0);
        let result =
            calculate(ModelKind::Team, SolutionKind::Platform, &costly).expect("calculation");
        assert!(result.monthly < 0.0);
        assert_eq!(result.breakeven, None);
        assert!(!result.solution.is_viable);

        let neutral = team_platform_inputs()
            .with("platformMaintenance", 0.0)
            .with("teamReduction", 0.0)
            .with("processEfficiency", 0.0);
        let result =
            calculate(ModelKind::Team, SolutionKind::Platform, &neutral).expect("calculation");
        assert_eq!(result.monthly, 0.0);
        assert_eq!(result.breakeven, None);
        assert!(!result.solution.is_viable);
    }

    #[test]
    fn hybrid_with_expensive_vendor_never_breaks_even() {
        let inputs = with_vendor_terms(team_platform_inputs(), 300.0)
            .with("platformPortion", 40.0)
            .with("vendorPortion", 30.0);
        let result = calculate(ModelKind::Team, SolutionKind::Hybrid, &inputs).expect("calculation");
        assert!(result.monthly < 0.0);
        assert_eq!(result.breakeven, None);
        assert_eq!(result.solution.break_even_months, None);
        assert!(!result.solution.is_viable);
        assert!(result.sensitivity().optimistic.breakeven.is_none());
    }

    #[test]
    fn ticket_baseline_flows_through_calculate() {
        let inputs = InputBag::new()
            .with("monthlyTickets", 500.0)
            .with("hoursPerTicket", 2.0)
            .with("peoplePerTicket", 1.0)
            .with("hourlyRate", 75.0)
            .with("vendorRate", 40.0)
            .with("managementOverhead", 0.0)
            .with("qualityImpact", 0.0)
            .with("knowledgeLoss", 0.0)
            .with("transitionTime", 0.0)
            .with("transitionCost", 0.0);
        let result =
            calculate(ModelKind::Ticket, SolutionKind::Outsource, &inputs).expect("calculation");
        assert_eq!(result.model, ModelKind::Ticket);
        assert_eq!(result.baseline.monthly, 75_000.0);
        assert_eq!(result.baseline.initial, 0.0);
        assert_eq!(result.baseline.breakdown["labor"], 75_000.0);
        assert_eq!(result.baseline.breakdown.len(), 1);
        assert_eq!(result.solution.cost.monthly, 40_000.0);
        assert_eq!(result.monthly, 35_000.0);
        assert_eq!(result.breakeven, Some(1));
        assert_eq!(result.data[23].baseline, 75_000.0 * 24.0);
    }
}
