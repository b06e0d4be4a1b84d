use crate::engine::{CalculationResult, SensitivityResult, HORIZON_MONTHS};
use crate::report::{describe_breakeven, format_money};

/// Plain-language paragraph describing one calculation, used to fill the
/// analysis prompt templates.
pub fn summarize(result: &CalculationResult, sensitivity: &SensitivityResult) -> String {
    let model = result.model.to_string().to_lowercase();
    let solution = result.solution.kind.to_string().to_lowercase();
    let mut out = format!(
        "Moving from the {model} model to the {solution} strategy changes monthly cost from {} to {}",
        format_money(result.baseline.monthly),
        format_money(result.solution.cost.monthly),
    );

    if result.monthly > 0.0 {
        out.push_str(&format!(
            ", saving {} per month. ",
            format_money(result.monthly)
        ));
    } else {
        out.push_str(&format!(
            ", adding {} per month. ",
            format_money(-result.monthly)
        ));
    }

    out.push_str(&format!(
        "The upfront investment of {} ",
        format_money(result.solution.cost.initial)
    ));
    match result.breakeven {
        None => out.push_str("is never recovered. "),
        Some(_) => out.push_str(&format!(
            "breaks even in {}. ",
            describe_breakeven(result.breakeven)
        )),
    }

    out.push_str(&format!(
        "Cumulative savings after {HORIZON_MONTHS} months are {}. ",
        format_money(result.total_savings())
    ));
    out.push_str(&format!(
        "With monthly savings varied by 20%, the outcome ranges from {} per month (pessimistic) to {} per month (optimistic).",
        format_money(sensitivity.pessimistic.monthly),
        format_money(sensitivity.optimistic.monthly),
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::summarize;
    use crate::engine::calculate;
    use crate::model::{InputBag, ModelKind, SolutionKind};

    #[test]
    fn describes_platform_payback() {
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
        let text = summarize(&result, &result.sensitivity());
        assert!(text.contains("team-based model to the platform strategy"));
        assert!(text.contains("from $96,000 to $58,760"));
        assert!(text.contains("saving $37,240 per month"));
        assert!(text.contains("breaks even in month 14"));
    }

    #[test]
    fn describes_costlier_outsourcing() {
        let inputs = InputBag::new()
            .with("monthly_tickets", 100.0)
            .with("hours_per_ticket", 2.0)
            .with("people_per_ticket", 1.0)
            .with("hourly_rate", 50.0)
            .with("vendor_rate", 40.0)
            .with("management_overhead", 0.15)
            .with("quality_impact", -0.15)
            .with("knowledge_loss", 0.2)
            .with("transition_time", 3.0)
            .with("transition_cost", 10_000.0);
        let result =
            calculate(ModelKind::Ticket, SolutionKind::Outsource, &inputs).expect("calculation");
        let text = summarize(&result, &result.sensitivity());
        assert!(text.contains("adding"));
        assert!(text.contains("is never recovered"));
    }
}
