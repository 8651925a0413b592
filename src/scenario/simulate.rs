//! The three projection scenarios

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::params::{InvestmentReturnParams, RetirementParams, SavingsRateParams};
use crate::error::Result;
use crate::timevalue::{self, round_money};

/// Annual withdrawal rate assumed sustainable in retirement (the 4% rule)
pub const SAFE_WITHDRAWAL_RATE: f64 = 0.04;

/// Result of saving a fixed share of income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsRateProjection {
    /// Human-readable label, e.g. "Save 20.0% of income"
    pub scenario: String,
    pub current_savings: f64,
    pub monthly_savings: f64,
    pub total_contributions: f64,
    pub future_value: f64,
    pub growth_amount: f64,
    pub years: u32,
    pub return_rate: f64,
}

/// One row of the return comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnScenario {
    pub return_rate: f64,
    pub future_value: f64,
    /// Initial amount plus all monthly contributions
    pub total_contributions: f64,
    pub growth: f64,
}

/// Side-by-side projections for several candidate returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentComparison {
    pub scenario: String,
    pub initial_amount: f64,
    pub monthly_contribution: f64,
    pub years: u32,
    /// Same order as the requested rates
    pub scenarios: Vec<ReturnScenario>,
}

/// Savings at retirement and the income they sustain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementProjection {
    pub scenario: String,
    pub current_age: u32,
    pub retirement_age: u32,
    pub years_to_retirement: u32,
    pub total_retirement_savings: f64,
    pub monthly_retirement_income: f64,
    pub annual_retirement_income: f64,
    pub total_contributions: f64,
    pub growth_amount: f64,
    pub return_rate: f64,
}

/// Project saving `savings_rate` of income each month
pub fn simulate_savings_rate(params: &SavingsRateParams) -> Result<SavingsRateProjection> {
    params.validate()?;

    let monthly_savings = params.annual_income / 12.0 * params.savings_rate;
    let months = params.months();

    let projection = timevalue::project(params.current_savings, monthly_savings, params.return_rate, months);

    debug!(
        "savings_rate: {:.2}/month for {} months at {} -> {:.2}",
        monthly_savings, months, params.return_rate, projection.future_value
    );

    let rounded = projection.rounded();
    Ok(SavingsRateProjection {
        scenario: format!("Save {:.1}% of income", params.savings_rate * 100.0),
        current_savings: round_money(params.current_savings),
        monthly_savings: round_money(monthly_savings),
        total_contributions: rounded.total_contributions,
        future_value: rounded.future_value,
        growth_amount: rounded.growth,
        years: params.years as u32,
        return_rate: params.return_rate,
    })
}

/// Compare one balance/contribution plan across several annual returns
///
/// This is a comparison table, not a ranking: rows come back in request order.
pub fn simulate_investment_returns(params: &InvestmentReturnParams) -> Result<InvestmentComparison> {
    params.validate()?;

    let months = params.months();
    let scenarios: Vec<ReturnScenario> = params
        .return_rates
        .par_iter()
        .map(|&rate| {
            let p = timevalue::project(params.initial_amount, params.monthly_contribution, rate, months);
            ReturnScenario {
                return_rate: rate,
                future_value: round_money(p.future_value),
                total_contributions: round_money(params.initial_amount + p.total_contributions),
                growth: round_money(p.growth),
            }
        })
        .collect();

    Ok(InvestmentComparison {
        scenario: "Investment Return Comparison".to_string(),
        initial_amount: round_money(params.initial_amount),
        monthly_contribution: round_money(params.monthly_contribution),
        years: params.years as u32,
        scenarios,
    })
}

/// Project savings to retirement and apply the 4% withdrawal rule
pub fn simulate_retirement(params: &RetirementParams) -> Result<RetirementProjection> {
    params.validate()?;

    let years = params.years_to_retirement();
    let projection = timevalue::project(
        params.current_savings,
        params.monthly_contribution,
        params.return_rate,
        years * 12,
    );

    let monthly_income = projection.future_value * SAFE_WITHDRAWAL_RATE / 12.0;
    let rounded = projection.rounded();

    Ok(RetirementProjection {
        scenario: "Retirement Planning".to_string(),
        current_age: params.current_age as u32,
        retirement_age: params.retirement_age as u32,
        years_to_retirement: years,
        total_retirement_savings: rounded.future_value,
        monthly_retirement_income: round_money(monthly_income),
        annual_retirement_income: round_money(monthly_income * 12.0),
        total_contributions: rounded.total_contributions,
        growth_amount: rounded.growth,
        return_rate: params.return_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_savings_rate_defaults() {
        let result = simulate_savings_rate(&SavingsRateParams::default()).unwrap();

        assert_eq!(result.scenario, "Save 20.0% of income");
        assert_eq!(result.monthly_savings, 1000.0);
        assert_eq!(result.total_contributions, 120_000.0);

        // 1000 * ((1 + 0.07/12)^120 - 1) / (0.07/12)
        assert_abs_diff_eq!(result.future_value, 173_084.81, epsilon = 0.01);
        assert_abs_diff_eq!(result.growth_amount, 53_084.81, epsilon = 0.01);
    }

    #[test]
    fn test_savings_rate_zero_years() {
        let params = SavingsRateParams {
            current_savings: 4_321.0,
            years: 0,
            ..Default::default()
        };
        let result = simulate_savings_rate(&params).unwrap();
        assert_eq!(result.future_value, 4_321.0);
        assert_eq!(result.total_contributions, 0.0);
        assert_eq!(result.growth_amount, 0.0);
    }

    #[test]
    fn test_savings_rate_zero_return() {
        let params = SavingsRateParams {
            current_savings: 1_000.0,
            return_rate: 0.0,
            years: 2,
            ..Default::default()
        };
        let result = simulate_savings_rate(&params).unwrap();
        assert_eq!(result.future_value, 25_000.0);
        assert_eq!(result.growth_amount, 0.0);
    }

    #[test]
    fn test_investment_rows_follow_input_order() {
        let params = InvestmentReturnParams {
            return_rates: vec![0.10, 0.0, 0.05],
            ..Default::default()
        };
        let result = simulate_investment_returns(&params).unwrap();

        let rates: Vec<f64> = result.scenarios.iter().map(|s| s.return_rate).collect();
        assert_eq!(rates, vec![0.10, 0.0, 0.05]);

        // Zero return: no growth, value is just what went in
        assert_eq!(result.scenarios[1].future_value, 70_000.0);
        assert_eq!(result.scenarios[1].total_contributions, 70_000.0);
        assert_eq!(result.scenarios[1].growth, 0.0);

        assert!(result.scenarios[0].future_value > result.scenarios[2].future_value);
    }

    #[test]
    fn test_investment_zero_years() {
        let params = InvestmentReturnParams {
            years: 0,
            ..Default::default()
        };
        let result = simulate_investment_returns(&params).unwrap();
        for row in &result.scenarios {
            assert_eq!(row.future_value, 10_000.0);
            assert_eq!(row.growth, 0.0);
        }
    }

    #[test]
    fn test_retirement_four_percent_rule() {
        let params = RetirementParams {
            current_age: 40,
            retirement_age: 60,
            current_savings: 50_000.0,
            monthly_contribution: 0.0,
            return_rate: 0.0,
        };
        let result = simulate_retirement(&params).unwrap();

        assert_eq!(result.years_to_retirement, 20);
        assert_eq!(result.total_retirement_savings, 50_000.0);
        assert_abs_diff_eq!(result.monthly_retirement_income, 166.67, epsilon = 1e-9);
        assert_abs_diff_eq!(result.annual_retirement_income, 2_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_retirement_with_growth() {
        let result = simulate_retirement(&RetirementParams::default()).unwrap();
        assert_eq!(result.years_to_retirement, 35);
        assert_eq!(result.total_contributions, 210_000.0);
        assert!(result.total_retirement_savings > result.total_contributions);
        assert_abs_diff_eq!(
            result.monthly_retirement_income,
            round_money(result.total_retirement_savings * 0.04 / 12.0),
            epsilon = 0.011
        );
    }
}
