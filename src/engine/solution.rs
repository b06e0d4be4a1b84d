use std::collections::BTreeMap;

use crate::engine::breakeven::{is_viable, resolve_breakeven};
use crate::engine::{CalculationError, CostSnapshot, SolutionCost};
use crate::model::{
    HybridStrategy, OperationalModel, OutsourceStrategy, PlatformStrategy, SolutionKind,
    SolutionStrategy,
};

pub fn calculate_solution(
    baseline: &CostSnapshot,
    model: &OperationalModel,
    strategy: &SolutionStrategy,
) -> Result<SolutionCost, CalculationError> {
    match strategy {
        SolutionStrategy::Platform(platform) => Ok(platform_cost(baseline, platform)),
        SolutionStrategy::Outsource(outsource) => {
            Ok(outsource_cost(baseline, model.hourly_rate(), outsource))
        }
        SolutionStrategy::Hybrid(hybrid) => hybrid_cost(baseline, model.hourly_rate(), hybrid),
    }
}

/// Automation cost. The team keeps running at baseline cost until the
/// platform is built, and that build-period cost counts as investment.
pub fn platform_cost(baseline: &CostSnapshot, platform: &PlatformStrategy) -> SolutionCost {
    let team_reduction_factor = 1.0 - platform.team_reduction;
    let efficiency_factor = 1.0 - platform.process_efficiency;
    let operations = baseline.monthly * team_reduction_factor * efficiency_factor;
    let monthly_after_build = operations + platform.platform_maintenance;

    let build_period_cost = baseline.monthly * platform.time_to_build;
    let total_investment = platform.platform_cost + build_period_cost;
    let monthly_savings = baseline.monthly - monthly_after_build;
    let break_even_months =
        resolve_breakeven(platform.time_to_build, total_investment, monthly_savings);

    let mut breakdown = BTreeMap::new();
    breakdown.insert("operations".to_string(), operations);
    breakdown.insert("maintenance".to_string(), platform.platform_maintenance);

    let mut investment = BTreeMap::new();
    investment.insert("platform_cost".to_string(), platform.platform_cost);
    investment.insert("build_period_cost".to_string(), build_period_cost);

    SolutionCost {
        kind: SolutionKind::Platform,
        cost: CostSnapshot {
            initial: total_investment,
            monthly: monthly_after_build,
            breakdown,
        },
        investment,
        monthly_savings,
        break_even_months,
        is_viable: is_viable(break_even_months),
        delay_months: platform.time_to_build,
    }
}

pub fn outsource_cost(
    baseline: &CostSnapshot,
    hourly_rate: f64,
    outsource: &OutsourceStrategy,
) -> SolutionCost {
    let vendor = VendorCost::for_slice(baseline.monthly, hourly_rate, outsource);
    let monthly_savings = baseline.monthly - vendor.total;
    let break_even_months = resolve_breakeven(0.0, outsource.transition_cost, monthly_savings);

    let mut investment = BTreeMap::new();
    investment.insert("transition_cost".to_string(), outsource.transition_cost);

    SolutionCost {
        kind: SolutionKind::Outsource,
        cost: CostSnapshot {
            initial: outsource.transition_cost,
            monthly: vendor.total,
            breakdown: vendor.breakdown(),
        },
        investment,
        monthly_savings,
        break_even_months,
        is_viable: is_viable(break_even_months),
        delay_months: 0.0,
    }
}

pub fn hybrid_cost(
    baseline: &CostSnapshot,
    hourly_rate: f64,
    hybrid: &HybridStrategy,
) -> Result<SolutionCost, CalculationError> {
    if hybrid.platform_portion + hybrid.vendor_portion > 100.0 {
        return Err(CalculationError::InvalidAllocation {
            platform_portion: hybrid.platform_portion,
            vendor_portion: hybrid.vendor_portion,
        });
    }

    let platform_slice = baseline.monthly * hybrid.platform_percentage();
    let platform_monthly = platform_slice
        * (1.0 - hybrid.team_reduction)
        * (1.0 - hybrid.process_efficiency)
        + hybrid.platform_maintenance;

    let vendor_slice = baseline.monthly * hybrid.vendor_percentage();
    let vendor = VendorCost::for_slice(vendor_slice, hourly_rate, &hybrid.outsource_terms());

    let internal_monthly = baseline.monthly * hybrid.internal_percentage();
    let monthly_total = platform_monthly + vendor.total + internal_monthly;

    let scaled_transition_cost = hybrid.transition_cost * hybrid.vendor_percentage();
    let total_initial_cost = hybrid.platform_cost + scaled_transition_cost;
    let monthly_savings = baseline.monthly - monthly_total;
    let break_even_months = resolve_breakeven(0.0, total_initial_cost, monthly_savings);

    let mut breakdown = BTreeMap::new();
    breakdown.insert("platform".to_string(), platform_monthly);
    breakdown.insert("vendor".to_string(), vendor.total);
    breakdown.insert("internal".to_string(), internal_monthly);

    let mut investment = BTreeMap::new();
    investment.insert("platform_cost".to_string(), hybrid.platform_cost);
    investment.insert("transition_cost".to_string(), scaled_transition_cost);

    Ok(SolutionCost {
        kind: SolutionKind::Hybrid,
        cost: CostSnapshot {
            initial: total_initial_cost,
            monthly: monthly_total,
            breakdown,
        },
        investment,
        monthly_savings,
        break_even_months,
        is_viable: is_viable(break_even_months),
        delay_months: 0.0,
    })
}

pub fn quality_factor(quality_impact: f64) -> f64 {
    if quality_impact >= 0.0 {
        1.0 - quality_impact
    } else {
        1.0 + quality_impact.abs()
    }
}

/// Knowledge-loss cost grows with the log of the transition length.
pub fn knowledge_factor(knowledge_loss: f64, transition_time: f64) -> f64 {
    1.0 + knowledge_loss * (transition_time + 1.0).log10()
}

/// Vendor price for a slice of baseline work, converted through internal hours.
#[derive(Debug, Clone, Copy)]
struct VendorCost {
    base: f64,
    overhead_factor: f64,
    quality_factor: f64,
    knowledge_factor: f64,
    total: f64,
}

impl VendorCost {
    fn for_slice(baseline_slice: f64, hourly_rate: f64, terms: &OutsourceStrategy) -> Self {
        let baseline_hours = baseline_slice / hourly_rate;
        let base = baseline_hours * terms.vendor_rate;
        let overhead_factor = 1.0 + terms.management_overhead;
        let quality_factor = quality_factor(terms.quality_impact);
        let knowledge_factor = knowledge_factor(terms.knowledge_loss, terms.transition_time);
        let total = base * overhead_factor * quality_factor * knowledge_factor;
        Self {
            base,
            overhead_factor,
            quality_factor,
            knowledge_factor,
            total,
        }
    }

    fn breakdown(&self) -> BTreeMap<String, f64> {
        let after_overhead = self.base * self.overhead_factor;
        let after_quality = after_overhead * self.quality_factor;
        let mut breakdown = BTreeMap::new();
        breakdown.insert("vendor".to_string(), self.base);
        breakdown.insert("management_overhead".to_string(), after_overhead - self.base);
        breakdown.insert("quality_adjustment".to_string(), after_quality - after_overhead);
        breakdown.insert(
            "knowledge_loss".to_string(),
            after_quality * self.knowledge_factor - after_quality,
        );
        breakdown
    }
}
