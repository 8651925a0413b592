//! Scenario parameter decoding and validation
//!
//! Parameters arrive as a loose key/value map. Missing keys take the defaults
//! below; present keys must have the right type and pass the range checks.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{EngineError, Result};
use crate::timevalue::MAX_EXPECTED_RETURN;

fn default_annual_income() -> f64 {
    60_000.0
}

fn default_savings_rate() -> f64 {
    0.20
}

fn default_years() -> i64 {
    10
}

fn default_return_rate() -> f64 {
    0.07
}

fn default_initial_amount() -> f64 {
    10_000.0
}

fn default_monthly_contribution() -> f64 {
    500.0
}

fn default_return_rates() -> Vec<f64> {
    vec![0.05, 0.07, 0.10]
}

fn default_current_age() -> i64 {
    30
}

fn default_retirement_age() -> i64 {
    65
}

/// Inputs for the `savings_rate` scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsRateParams {
    #[serde(default = "default_annual_income")]
    pub annual_income: f64,

    #[serde(default)]
    pub current_savings: f64,

    /// Fraction of income saved each month (0.20 = 20%)
    #[serde(default = "default_savings_rate")]
    pub savings_rate: f64,

    #[serde(default = "default_years")]
    pub years: i64,

    #[serde(default = "default_return_rate")]
    pub return_rate: f64,
}

impl Default for SavingsRateParams {
    fn default() -> Self {
        Self {
            annual_income: default_annual_income(),
            current_savings: 0.0,
            savings_rate: default_savings_rate(),
            years: default_years(),
            return_rate: default_return_rate(),
        }
    }
}

impl SavingsRateParams {
    pub fn validate(&self) -> Result<()> {
        require_positive("annual_income", self.annual_income)?;
        require_non_negative("current_savings", self.current_savings)?;
        require_fraction("savings_rate", self.savings_rate)?;
        require_years("years", self.years)?;
        require_rate("return_rate", self.return_rate)
    }

    pub fn months(&self) -> u32 {
        (self.years as u32) * 12
    }
}

/// Inputs for the `investment_return` comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentReturnParams {
    #[serde(default = "default_initial_amount")]
    pub initial_amount: f64,

    #[serde(default = "default_monthly_contribution")]
    pub monthly_contribution: f64,

    #[serde(default = "default_years")]
    pub years: i64,

    /// Candidate annual returns, reported back in this order
    #[serde(default = "default_return_rates")]
    pub return_rates: Vec<f64>,
}

impl Default for InvestmentReturnParams {
    fn default() -> Self {
        Self {
            initial_amount: default_initial_amount(),
            monthly_contribution: default_monthly_contribution(),
            years: default_years(),
            return_rates: default_return_rates(),
        }
    }
}

impl InvestmentReturnParams {
    pub fn validate(&self) -> Result<()> {
        require_non_negative("initial_amount", self.initial_amount)?;
        require_non_negative("monthly_contribution", self.monthly_contribution)?;
        require_years("years", self.years)?;

        if self.return_rates.is_empty() {
            return Err(EngineError::invalid("return_rates", "must contain at least one rate"));
        }
        for &rate in &self.return_rates {
            require_rate("return_rates", rate)?;
        }
        Ok(())
    }

    pub fn months(&self) -> u32 {
        (self.years as u32) * 12
    }
}

/// Inputs for the `retirement` scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementParams {
    #[serde(default = "default_current_age")]
    pub current_age: i64,

    #[serde(default = "default_retirement_age")]
    pub retirement_age: i64,

    #[serde(default)]
    pub current_savings: f64,

    #[serde(default = "default_monthly_contribution")]
    pub monthly_contribution: f64,

    #[serde(default = "default_return_rate")]
    pub return_rate: f64,
}

impl Default for RetirementParams {
    fn default() -> Self {
        Self {
            current_age: default_current_age(),
            retirement_age: default_retirement_age(),
            current_savings: 0.0,
            monthly_contribution: default_monthly_contribution(),
            return_rate: default_return_rate(),
        }
    }
}

impl RetirementParams {
    pub fn validate(&self) -> Result<()> {
        if self.current_age < 0 {
            return Err(EngineError::invalid("current_age", "must be non-negative"));
        }
        if self.retirement_age <= self.current_age {
            return Err(EngineError::invalid(
                "retirement_age",
                format!("must be greater than current age {}", self.current_age),
            ));
        }
        require_years("retirement_age", self.retirement_age - self.current_age)?;
        require_non_negative("current_savings", self.current_savings)?;
        require_non_negative("monthly_contribution", self.monthly_contribution)?;
        require_rate("return_rate", self.return_rate)
    }

    pub fn years_to_retirement(&self) -> u32 {
        (self.retirement_age - self.current_age).max(0) as u32
    }
}

/// Decode a parameter map into a typed parameter struct
pub fn decode<T: DeserializeOwned>(params: &Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(params.clone()))
        .map_err(|e| EngineError::InvalidParameters(e.to_string()))
}

/// Reject rates that are not finite or fall outside `[0, MAX_EXPECTED_RETURN]`
pub fn require_rate(field: &str, rate: f64) -> Result<()> {
    if !rate.is_finite() || !(0.0..=MAX_EXPECTED_RETURN).contains(&rate) {
        return Err(EngineError::invalid(
            field,
            format!("must be between 0 and {MAX_EXPECTED_RETURN}, got {rate}"),
        ));
    }
    Ok(())
}

fn require_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EngineError::invalid(field, format!("must be greater than 0, got {value}")));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::invalid(field, format!("must not be negative, got {value}")));
    }
    Ok(())
}

fn require_fraction(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(EngineError::invalid(field, format!("must be between 0 and 1, got {value}")));
    }
    Ok(())
}

fn require_years(field: &str, years: i64) -> Result<()> {
    // 100 years keeps the month count comfortably inside u32/i32 exponents
    if !(0..=100).contains(&years) {
        return Err(EngineError::invalid(field, format!("must be between 0 and 100, got {years}")));
    }
    Ok(())
}
