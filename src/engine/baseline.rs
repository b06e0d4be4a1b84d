use std::collections::BTreeMap;

use crate::engine::{CostSnapshot, MONTHLY_HOURS};
use crate::model::OperationalModel;

/// Current-state monthly operating cost. The baseline never carries an initial cost.
pub fn calculate_baseline(model: &OperationalModel) -> CostSnapshot {
    match model {
        OperationalModel::Team(team) => {
            let base_monthly = team.team_size * team.hourly_rate * MONTHLY_HOURS;
            let inefficiency = base_monthly * (1.0 - team.service_efficiency);
            let overhead = base_monthly * team.operational_overhead;
            let monthly = base_monthly
                * (1.0 + (1.0 - team.service_efficiency) + team.operational_overhead);

            let mut breakdown = BTreeMap::new();
            breakdown.insert("labor".to_string(), base_monthly);
            breakdown.insert("inefficiency".to_string(), inefficiency);
            breakdown.insert("overhead".to_string(), overhead);
            CostSnapshot {
                initial: 0.0,
                monthly,
                breakdown,
            }
        }
        OperationalModel::Ticket(ticket) => {
            let monthly = ticket.monthly_tickets
                * ticket.hours_per_ticket
                * ticket.people_per_ticket
                * ticket.hourly_rate;

            let mut breakdown = BTreeMap::new();
            breakdown.insert("labor".to_string(), monthly);
            CostSnapshot {
                initial: 0.0,
                monthly,
                breakdown,
            }
        }
    }
}
