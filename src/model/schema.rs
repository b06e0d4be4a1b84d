use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Team,
    Ticket,
}

impl ModelKind {
    pub const ALL: [ModelKind; 2] = [ModelKind::Team, ModelKind::Ticket];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::Ticket => "ticket",
        }
    }
}

impl Display for ModelKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Team => "Team-based",
            Self::Ticket => "Ticket-based",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operational model: {0}")]
pub struct UnknownModelError(pub String);

impl FromStr for ModelKind {
    type Err = UnknownModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "team" | "team-based" | "team_based" => Ok(Self::Team),
            "ticket" | "ticket-based" | "ticket_based" | "tickets" => Ok(Self::Ticket),
            _ => Err(UnknownModelError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SolutionKind {
    Platform,
    Outsource,
    Hybrid,
}

impl SolutionKind {
    pub const ALL: [SolutionKind; 3] = [
        SolutionKind::Platform,
        SolutionKind::Outsource,
        SolutionKind::Hybrid,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::Outsource => "outsource",
            Self::Hybrid => "hybrid",
        }
    }
}

impl Display for SolutionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Platform => "Platform",
            Self::Outsource => "Outsource",
            Self::Hybrid => "Hybrid",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown solution type: {0}")]
pub struct UnknownSolutionError(pub String);

impl FromStr for SolutionKind {
    type Err = UnknownSolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "platform" | "automation" => Ok(Self::Platform),
            "outsource" | "outsourcing" | "vendor" => Ok(Self::Outsource),
            "hybrid" | "mix" => Ok(Self::Hybrid),
            _ => Err(UnknownSolutionError(s.to_string())),
        }
    }
}

/// In-house team cost structure. Efficiency and overhead are fractions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TeamModel {
    pub team_size: f64,
    pub hourly_rate: f64,
    pub service_efficiency: f64,
    pub operational_overhead: f64,
}

/// Per-ticket cost structure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TicketModel {
    pub monthly_tickets: f64,
    pub hours_per_ticket: f64,
    pub people_per_ticket: f64,
    pub hourly_rate: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationalModel {
    Team(TeamModel),
    Ticket(TicketModel),
}

impl OperationalModel {
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::Team(_) => ModelKind::Team,
            Self::Ticket(_) => ModelKind::Ticket,
        }
    }

    /// Internal hourly rate, the basis for converting cost into vendor hours.
    pub fn hourly_rate(&self) -> f64 {
        match self {
            Self::Team(team) => team.hourly_rate,
            Self::Ticket(ticket) => ticket.hourly_rate,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlatformStrategy {
    pub platform_cost: f64,
    pub platform_maintenance: f64,
    /// Months before the platform yields any operational benefit.
    pub time_to_build: f64,
    pub team_reduction: f64,
    pub process_efficiency: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OutsourceStrategy {
    pub vendor_rate: f64,
    pub management_overhead: f64,
    /// Positive values are a quality improvement and lower cost, negative
    /// values are a degradation and raise it.
    pub quality_impact: f64,
    pub knowledge_loss: f64,
    pub transition_time: f64,
    pub transition_cost: f64,
}

/// Workload split between platform, vendor and the retained internal team.
/// Portions are percentages; whatever they leave over stays internal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HybridStrategy {
    pub platform_portion: f64,
    pub vendor_portion: f64,
    pub platform_cost: f64,
    pub platform_maintenance: f64,
    pub team_reduction: f64,
    pub process_efficiency: f64,
    pub vendor_rate: f64,
    pub management_overhead: f64,
    pub quality_impact: f64,
    pub knowledge_loss: f64,
    pub transition_time: f64,
    pub transition_cost: f64,
}

impl HybridStrategy {
    pub fn platform_percentage(&self) -> f64 {
        self.platform_portion / 100.0
    }

    pub fn vendor_percentage(&self) -> f64 {
        self.vendor_portion / 100.0
    }

    pub fn internal_percentage(&self) -> f64 {
        1.0 - self.platform_percentage() - self.vendor_percentage()
    }

    pub fn outsource_terms(&self) -> OutsourceStrategy {
        OutsourceStrategy {
            vendor_rate: self.vendor_rate,
            management_overhead: self.management_overhead,
            quality_impact: self.quality_impact,
            knowledge_loss: self.knowledge_loss,
            transition_time: self.transition_time,
            transition_cost: self.transition_cost,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolutionStrategy {
    Platform(PlatformStrategy),
    Outsource(OutsourceStrategy),
    Hybrid(HybridStrategy),
}

impl SolutionStrategy {
    pub fn kind(&self) -> SolutionKind {
        match self {
            Self::Platform(_) => SolutionKind::Platform,
            Self::Outsource(_) => SolutionKind::Outsource,
            Self::Hybrid(_) => SolutionKind::Hybrid,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{ModelKind, SolutionKind};

    #[test]
    fn parses_tags_case_insensitively() {
        assert_eq!(ModelKind::from_str(" Team ").expect("team"), ModelKind::Team);
        assert_eq!(
            ModelKind::from_str("ticket-based").expect("ticket"),
            ModelKind::Ticket
        );
        assert_eq!(
            SolutionKind::from_str("OUTSOURCE").expect("outsource"),
            SolutionKind::Outsource
        );
    }

    #[test]
    fn rejects_unknown_tags() {
        let err = ModelKind::from_str("freelance").expect_err("unknown model accepted");
        assert_eq!(err.to_string(), "unknown operational model: freelance");
        let err = SolutionKind::from_str("offshore").expect_err("unknown solution accepted");
        assert_eq!(err.to_string(), "unknown solution type: offshore");
    }

    #[test]
    fn slugs_round_trip_through_parser() {
        for kind in SolutionKind::ALL {
            assert_eq!(SolutionKind::from_str(kind.as_slug()).expect("slug"), kind);
        }
        for kind in ModelKind::ALL {
            assert_eq!(ModelKind::from_str(kind.as_slug()).expect("slug"), kind);
        }
    }
}
