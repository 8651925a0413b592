//! What-if scenario simulation built on the time-value arithmetic
//!
//! Three scenario kinds are supported, selected by a string tag:
//! - `savings_rate`: save a share of income every month
//! - `investment_return`: compare one plan across several annual returns
//! - `retirement`: project to retirement age and apply the 4% rule

mod params;
mod simulate;

pub use params::{decode, require_rate, InvestmentReturnParams, RetirementParams, SavingsRateParams};
pub use simulate::{
    simulate_investment_returns, simulate_retirement, simulate_savings_rate, InvestmentComparison,
    RetirementProjection, ReturnScenario, SavingsRateProjection, SAFE_WITHDRAWAL_RATE,
};

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{EngineError, Result};

/// Scenario selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    SavingsRate,
    InvestmentReturn,
    Retirement,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] = [
        ScenarioKind::SavingsRate,
        ScenarioKind::InvestmentReturn,
        ScenarioKind::Retirement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::SavingsRate => "savings_rate",
            ScenarioKind::InvestmentReturn => "investment_return",
            ScenarioKind::Retirement => "retirement",
        }
    }

    /// Describe every scenario and the parameters it reads
    pub fn catalog() -> Vec<ScenarioDescriptor> {
        Self::ALL.iter().map(|kind| kind.descriptor()).collect()
    }

    pub fn descriptor(&self) -> ScenarioDescriptor {
        let (name, description, parameters): (&str, &str, &[&str]) = match self {
            ScenarioKind::SavingsRate => (
                "Savings Rate Simulation",
                "Simulate what happens if you change your savings rate",
                &["annual_income", "current_savings", "savings_rate", "years", "return_rate"],
            ),
            ScenarioKind::InvestmentReturn => (
                "Investment Return Comparison",
                "Compare different investment return scenarios",
                &["initial_amount", "monthly_contribution", "years", "return_rates"],
            ),
            ScenarioKind::Retirement => (
                "Retirement Planning",
                "Simulate retirement savings scenarios",
                &["current_age", "retirement_age", "current_savings", "monthly_contribution", "return_rate"],
            ),
        };

        ScenarioDescriptor {
            kind: *self,
            name: name.to_string(),
            description: description.to_string(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "savings_rate" => Ok(ScenarioKind::SavingsRate),
            "investment_return" => Ok(ScenarioKind::InvestmentReturn),
            "retirement" => Ok(ScenarioKind::Retirement),
            other => Err(EngineError::UnknownScenario(other.to_string())),
        }
    }
}

/// Catalog entry for a scenario kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDescriptor {
    #[serde(rename = "type")]
    pub kind: ScenarioKind,
    pub name: String,
    pub description: String,
    pub parameters: Vec<String>,
}

/// Result of any scenario, tagged with its kind when serialized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scenario_type", rename_all = "snake_case")]
pub enum ScenarioOutcome {
    SavingsRate(SavingsRateProjection),
    InvestmentReturn(InvestmentComparison),
    Retirement(RetirementProjection),
}

impl ScenarioOutcome {
    pub fn kind(&self) -> ScenarioKind {
        match self {
            ScenarioOutcome::SavingsRate(_) => ScenarioKind::SavingsRate,
            ScenarioOutcome::InvestmentReturn(_) => ScenarioKind::InvestmentReturn,
            ScenarioOutcome::Retirement(_) => ScenarioKind::Retirement,
        }
    }
}

/// Dispatch a scenario by tag over a loose parameter map
pub fn simulate_scenario(scenario_type: &str, parameters: &Map<String, Value>) -> Result<ScenarioOutcome> {
    let kind: ScenarioKind = scenario_type.parse()?;
    debug!("simulating {} with {} parameter(s)", kind, parameters.len());
    simulate_kind(kind, parameters)
}

/// Run an already-parsed scenario kind
pub fn simulate_kind(kind: ScenarioKind, parameters: &Map<String, Value>) -> Result<ScenarioOutcome> {
    match kind {
        ScenarioKind::SavingsRate => {
            let params: SavingsRateParams = decode(parameters)?;
            simulate_savings_rate(&params).map(ScenarioOutcome::SavingsRate)
        }
        ScenarioKind::InvestmentReturn => {
            let params: InvestmentReturnParams = decode(parameters)?;
            simulate_investment_returns(&params).map(ScenarioOutcome::InvestmentReturn)
        }
        ScenarioKind::Retirement => {
            let params: RetirementParams = decode(parameters)?;
            simulate_retirement(&params).map(ScenarioOutcome::Retirement)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_unknown_scenario_is_a_client_error() {
        let err = simulate_scenario("lottery", &Map::new()).unwrap_err();
        assert!(matches!(err, EngineError::UnknownScenario(ref s) if s == "lottery"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_dispatch_by_tag() {
        for kind in ScenarioKind::ALL {
            let outcome = simulate_scenario(kind.as_str(), &Map::new()).unwrap();
            assert_eq!(outcome.kind(), kind);
        }
    }

    #[test]
    fn test_dispatch_uses_supplied_values() {
        let params = map(json!({
            "annual_income": 120000,
            "savings_rate": 0.1,
            "years": 0,
            "current_savings": 2500.5
        }));

        match simulate_scenario("savings_rate", &params).unwrap() {
            ScenarioOutcome::SavingsRate(r) => {
                assert_eq!(r.monthly_savings, 1000.0);
                assert_eq!(r.future_value, 2500.5);
                assert_eq!(r.scenario, "Save 10.0% of income");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_negative_years_never_computed() {
        let params = map(json!({ "years": -1 }));
        let err = simulate_scenario("investment_return", &params).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let outcome = simulate_scenario("retirement", &Map::new()).unwrap();
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["scenario_type"], "retirement");
        assert_eq!(value["years_to_retirement"], 35);
    }

    #[test]
    fn test_catalog_lists_all_kinds() {
        let catalog = ScenarioKind::catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[1].name, "Investment Return Comparison");
        assert!(catalog[2].parameters.contains(&"retirement_age".to_string()));
    }
}
