use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::schema::{
    HybridStrategy, ModelKind, OperationalModel, OutsourceStrategy, PlatformStrategy,
    SolutionKind, SolutionStrategy, TeamModel, TicketModel,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("missing input: {field}")]
    Missing { field: &'static str },
    #[error("invalid input {field} = {value}: {reason}")]
    Invalid {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("malformed assignment `{0}`, expected key=value")]
    MalformedAssignment(String),
}

/// Flat bag of named numeric assumptions as collected by the input forms.
/// Keys are stored in snake_case whatever casing the caller used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct InputBag {
    values: BTreeMap<String, f64>,
}

impl InputBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: f64) {
        self.values.insert(normalize_key(key), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(&normalize_key(key)).copied()
    }

    pub fn require(&self, key: &'static str) -> Result<f64, InputError> {
        self.get(key).ok_or(InputError::Missing { field: key })
    }

    /// Overlays `other` on top of this bag; keys present in both take `other`'s value.
    pub fn merge(&mut self, other: &InputBag) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), *value);
        }
    }

    /// Parses a `key=value` assignment as given on the command line.
    pub fn parse_assignment(raw: &str) -> Result<(String, f64), InputError> {
        let Some((key, value)) = raw.split_once('=') else {
            return Err(InputError::MalformedAssignment(raw.to_string()));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(InputError::MalformedAssignment(raw.to_string()));
        }
        let value = value
            .trim()
            .parse::<f64>()
            .map_err(|_| InputError::MalformedAssignment(raw.to_string()))?;
        Ok((normalize_key(key), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<String, f64>> for InputBag {
    fn from(raw: BTreeMap<String, f64>) -> Self {
        let mut bag = InputBag::new();
        for (key, value) in raw {
            bag.set(&key, value);
        }
        bag
    }
}

impl From<InputBag> for BTreeMap<String, f64> {
    fn from(bag: InputBag) -> Self {
        bag.values
    }
}

/// `teamSize`, `team-size` and `team_size` all map to `team_size`.
pub fn normalize_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    for ch in raw.trim().chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '-' || ch == ' ' {
            out.push('_');
        } else {
            out.push(ch);
        }
    }
    out
}

impl OperationalModel {
    pub fn from_inputs(kind: ModelKind, inputs: &InputBag) -> Result<Self, InputError> {
        let model = match kind {
            ModelKind::Team => Self::Team(TeamModel {
                team_size: inputs.require("team_size")?,
                hourly_rate: inputs.require("hourly_rate")?,
                service_efficiency: inputs.require("service_efficiency")?,
                operational_overhead: inputs.require("operational_overhead")?,
            }),
            ModelKind::Ticket => Self::Ticket(TicketModel {
                monthly_tickets: inputs.require("monthly_tickets")?,
                hours_per_ticket: inputs.require("hours_per_ticket")?,
                people_per_ticket: inputs.require("people_per_ticket")?,
                hourly_rate: inputs.require("hourly_rate")?,
            }),
        };
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        match self {
            Self::Team(team) => {
                non_negative("team_size", team.team_size)?;
                non_negative("hourly_rate", team.hourly_rate)?;
                fraction("service_efficiency", team.service_efficiency)?;
                fraction("operational_overhead", team.operational_overhead)?;
            }
            Self::Ticket(ticket) => {
                non_negative("monthly_tickets", ticket.monthly_tickets)?;
                non_negative("hours_per_ticket", ticket.hours_per_ticket)?;
                non_negative("people_per_ticket", ticket.people_per_ticket)?;
                non_negative("hourly_rate", ticket.hourly_rate)?;
            }
        }
        Ok(())
    }
}

impl SolutionStrategy {
    pub fn from_inputs(kind: SolutionKind, inputs: &InputBag) -> Result<Self, InputError> {
        let strategy = match kind {
            SolutionKind::Platform => Self::Platform(PlatformStrategy {
                platform_cost: inputs.require("platform_cost")?,
                platform_maintenance: inputs.require("platform_maintenance")?,
                time_to_build: inputs.require("time_to_build")?,
                team_reduction: inputs.require("team_reduction")?,
                process_efficiency: inputs.require("process_efficiency")?,
            }),
            SolutionKind::Outsource => Self::Outsource(OutsourceStrategy {
                vendor_rate: inputs.require("vendor_rate")?,
                management_overhead: inputs.require("management_overhead")?,
                quality_impact: inputs.require("quality_impact")?,
                knowledge_loss: inputs.require("knowledge_loss")?,
                transition_time: inputs.require("transition_time")?,
                transition_cost: inputs.require("transition_cost")?,
            }),
            SolutionKind::Hybrid => Self::Hybrid(HybridStrategy {
                platform_portion: inputs.require("platform_portion")?,
                vendor_portion: inputs.require("vendor_portion")?,
                platform_cost: inputs.require("platform_cost")?,
                platform_maintenance: inputs.require("platform_maintenance")?,
                team_reduction: inputs.require("team_reduction")?,
                process_efficiency: inputs.require("process_efficiency")?,
                vendor_rate: inputs.require("vendor_rate")?,
                management_overhead: inputs.require("management_overhead")?,
                quality_impact: inputs.require("quality_impact")?,
                knowledge_loss: inputs.require("knowledge_loss")?,
                transition_time: inputs.require("transition_time")?,
                transition_cost: inputs.require("transition_cost")?,
            }),
        };
        Ok(strategy)
    }

    /// Field-level checks only. The hybrid allocation total is checked by the engine.
    pub fn validate(&self) -> Result<(), InputError> {
        match self {
            Self::Platform(platform) => {
                non_negative("platform_cost", platform.platform_cost)?;
                non_negative("platform_maintenance", platform.platform_maintenance)?;
                non_negative("time_to_build", platform.time_to_build)?;
                fraction("team_reduction", platform.team_reduction)?;
                fraction("process_efficiency", platform.process_efficiency)?;
            }
            Self::Outsource(outsource) => validate_outsource(outsource)?,
            Self::Hybrid(hybrid) => {
                within("platform_portion", hybrid.platform_portion, 0.0, 100.0)?;
                within("vendor_portion", hybrid.vendor_portion, 0.0, 100.0)?;
                non_negative("platform_cost", hybrid.platform_cost)?;
                non_negative("platform_maintenance", hybrid.platform_maintenance)?;
                fraction("team_reduction", hybrid.team_reduction)?;
                fraction("process_efficiency", hybrid.process_efficiency)?;
                validate_outsource(&hybrid.outsource_terms())?;
            }
        }
        Ok(())
    }
}

fn validate_outsource(outsource: &OutsourceStrategy) -> Result<(), InputError> {
    non_negative("vendor_rate", outsource.vendor_rate)?;
    fraction("management_overhead", outsource.management_overhead)?;
    within("quality_impact", outsource.quality_impact, -0.5, 0.5)?;
    fraction("knowledge_loss", outsource.knowledge_loss)?;
    non_negative("transition_time", outsource.transition_time)?;
    non_negative("transition_cost", outsource.transition_cost)?;
    Ok(())
}

fn finite(field: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::Invalid {
            field,
            value,
            reason: "must be a finite number",
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    if finite(field, value)? < 0.0 {
        return Err(InputError::Invalid {
            field,
            value,
            reason: "must not be negative",
        });
    }
    Ok(())
}

fn fraction(field: &'static str, value: f64) -> Result<(), InputError> {
    if !(0.0..=1.0).contains(&finite(field, value)?) {
        return Err(InputError::Invalid {
            field,
            value,
            reason: "must be a fraction between 0 and 1",
        });
    }
    Ok(())
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), InputError> {
    if !(min..=max).contains(&finite(field, value)?) {
        return Err(InputError::Invalid {
            field,
            value,
            reason: "outside the accepted range",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{normalize_key, InputBag, InputError};
    use crate::model::schema::{ModelKind, OperationalModel, SolutionKind, SolutionStrategy};

    fn team_bag() -> InputBag {
        InputBag::new()
            .with("teamSize", 5.0)
            .with("hourlyRate", 75.0)
            .with("serviceEfficiency", 0.6)
            .with("operationalOverhead", 0.2)
    }

    #[test]
    fn normalizes_key_casing() {
        assert_eq!(normalize_key("teamSize"), "team_size");
        assert_eq!(normalize_key("team-size"), "team_size");
        assert_eq!(normalize_key("team_size"), "team_size");
        assert_eq!(normalize_key(" hourlyRate "), "hourly_rate");
    }

    #[test]
    fn builds_team_model_from_camel_case_bag() {
        let model =
            OperationalModel::from_inputs(ModelKind::Team, &team_bag()).expect("team model");
        let OperationalModel::Team(team) = model else {
            panic!("expected team model");
        };
        assert_eq!(team.team_size, 5.0);
        assert_eq!(team.operational_overhead, 0.2);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn reports_first_missing_field() {
        let err = SolutionStrategy::from_inputs(SolutionKind::Platform, &team_bag())
            .expect_err("platform inputs missing");
        assert_eq!(
            err,
            InputError::Missing {
                field: "platform_cost"
            }
        );
    }

    #[test]
    fn merge_prefers_right_hand_values() {
        let mut base = team_bag();
        base.merge(&InputBag::new().with("team_size", 8.0).with("vendor_rate", 40.0));
        assert_eq!(base.get("teamSize"), Some(8.0));
        assert_eq!(base.get("vendor_rate"), Some(40.0));
        assert_eq!(base.len(), 5);
    }

    #[test]
    fn parses_cli_assignments() {
        let (key, value) = InputBag::parse_assignment("vendorRate=42.5").expect("assignment");
        assert_eq!(key, "vendor_rate");
        assert_eq!(value, 42.5);
        assert!(InputBag::parse_assignment("vendor_rate").is_err());
        assert!(InputBag::parse_assignment("=4").is_err());
        assert!(InputBag::parse_assignment("vendor_rate=abc").is_err());
    }

    #[test]
    fn rejects_out_of_range_fractions_and_nan() {
        let bag = team_bag().with("service_efficiency", 1.4);
        let model = OperationalModel::from_inputs(ModelKind::Team, &bag).expect("team model");
        assert!(matches!(
            model.validate(),
            Err(InputError::Invalid {
                field: "service_efficiency",
                ..
            })
        ));

        let bag = team_bag().with("hourly_rate", f64::NAN);
        let model = OperationalModel::from_inputs(ModelKind::Team, &bag).expect("team model");
        assert!(model.validate().is_err());
    }

    #[test]
    fn deserializes_bag_with_normalized_keys() {
        let bag: InputBag =
            serde_json::from_str(r#"{"teamSize": 3, "hourly-rate": 50.0}"#).expect("bag json");
        assert_eq!(bag.get("team_size"), Some(3.0));
        assert_eq!(bag.get("hourly_rate"), Some(50.0));
    }
}
