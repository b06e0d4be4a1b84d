use crate::engine::{MonthlyDataPoint, HORIZON_MONTHS};

/// Cumulative savings within half a cent of zero count as recovered.
const RECOVERY_TOLERANCE: f64 = 0.005;

/// First month at which the upfront cost is recovered, counting the delay
/// before savings begin. `None` when the solution never saves money.
///
/// Upfront costs are rounded to the cent before dividing: a shortfall under
/// half a cent is treated as recovered, so `10_000.003 / 2_500` pays back in
/// month 4, not 5. [`first_recovered_month`] rounds the same way, which keeps
/// the headline month and the projection series in step.
///
/// The result is never earlier than the end of the delay, and may exceed the
/// projection horizon; callers compare it against [`HORIZON_MONTHS`] to tell
/// "viable but slow" apart from "within window".
pub fn resolve_breakeven(delay_months: f64, upfront: f64, monthly_savings: f64) -> Option<u32> {
    if monthly_savings.is_nan() || monthly_savings <= 0.0 {
        return None;
    }
    if !upfront.is_finite() || !delay_months.is_finite() {
        return None;
    }
    let delay = delay_months.max(0.0);
    // Nothing to recover: payback is as soon as the delay is over.
    if upfront <= RECOVERY_TOLERANCE {
        return Some(earliest_month(delay));
    }
    let recovery = (upfront - RECOVERY_TOLERANCE) / monthly_savings;
    let month = (delay + recovery).ceil().max(1.0);
    // f64 -> u32 saturates, so absurdly long paybacks pin to u32::MAX.
    Some(month as u32)
}

pub fn is_viable(breakeven: Option<u32>) -> bool {
    breakeven.is_some_and(|month| month <= HORIZON_MONTHS)
}

/// First month of the series, no earlier than the end of the delay, whose
/// cumulative savings are non-negative.
pub fn first_recovered_month(data: &[MonthlyDataPoint], delay_months: f64) -> Option<u32> {
    let earliest = earliest_month(delay_months.max(0.0));
    data.iter()
        .filter(|point| point.month >= earliest)
        .find(|point| point.savings >= -RECOVERY_TOLERANCE)
        .map(|point| point.month)
}

fn earliest_month(delay: f64) -> u32 {
    delay.ceil().max(1.0) as u32
}
