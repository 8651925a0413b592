//! Monthly targets and goal-achievement estimates

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::goal::SavingsGoal;
use crate::timevalue::{round_money, round_to};

/// Expected annual return assumed when the caller gives none
pub const DEFAULT_EXPECTED_RETURN: f64 = 0.05;

/// Estimates beyond this many years are flagged as not achievable
pub const MAX_REASONABLE_YEARS: f64 = 50.0;

/// How the time to reach a goal is estimated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateMode {
    /// `remaining / contribution`, ignoring growth on contributions.
    /// Overestimates the time whenever the expected return is positive.
    #[default]
    Linear,
    /// Balance and contributions compound monthly at `expected_return / 12`
    Compounding,
}

/// Outcome of a goal-achievement estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPrediction {
    pub achievable: bool,

    /// None when no estimate was made (non-positive contribution)
    pub months_to_goal: Option<f64>,

    pub years_to_goal: Option<f64>,

    pub monthly_contribution: f64,

    pub expected_return: f64,

    pub method: EstimateMode,

    pub message: String,
}

/// Whole calendar months from `as_of` to `target_date`
///
/// Day of month is ignored; a target on or before `as_of` gives 0.
pub fn months_until(as_of: NaiveDate, target_date: NaiveDate) -> u32 {
    if target_date <= as_of {
        return 0;
    }

    let years = target_date.year() - as_of.year();
    let months = target_date.month() as i32 - as_of.month() as i32;
    (years * 12 + months).max(0) as u32
}

/// Monthly saving needed to hit the goal by its target date
///
/// Zero when the goal is already met or its date is now or past.
pub fn monthly_target_for(goal: &SavingsGoal, as_of: NaiveDate) -> f64 {
    let months = months_until(as_of, goal.target_date);
    if months == 0 {
        return 0.0;
    }

    round_money(goal.remaining() / months as f64)
}

/// Estimate how long `monthly_contribution` takes to close the gap to the target
pub fn predict_goal_achievement(
    goal: &SavingsGoal,
    monthly_contribution: f64,
    expected_return: f64,
    mode: EstimateMode,
) -> GoalPrediction {
    if monthly_contribution <= 0.0 {
        return GoalPrediction {
            achievable: false,
            months_to_goal: None,
            years_to_goal: None,
            monthly_contribution,
            expected_return,
            method: mode,
            message: "Monthly contribution must be greater than 0".to_string(),
        };
    }

    let remaining = goal.target_amount - goal.current_amount;
    if remaining <= 0.0 {
        return GoalPrediction {
            achievable: true,
            months_to_goal: Some(0.0),
            years_to_goal: Some(0.0),
            monthly_contribution,
            expected_return,
            method: mode,
            message: "Goal already achieved!".to_string(),
        };
    }

    let months_needed = match mode {
        EstimateMode::Linear => linear_months(remaining, monthly_contribution, expected_return),
        EstimateMode::Compounding => compounding_months(goal, monthly_contribution, expected_return),
    };
    let years_needed = months_needed / 12.0;
    let achievable = years_needed <= MAX_REASONABLE_YEARS;

    let message = if achievable {
        format!("Goal achievable in {:.1} years", round_to(years_needed, 1))
    } else {
        "Goal may take too long to achieve".to_string()
    };

    GoalPrediction {
        achievable,
        months_to_goal: Some(round_to(months_needed, 1)),
        years_to_goal: Some(round_to(years_needed, 1)),
        monthly_contribution,
        expected_return,
        method: mode,
        message,
    }
}

/// Plain division; whole months only when a positive return was assumed
fn linear_months(remaining: f64, monthly_contribution: f64, expected_return: f64) -> f64 {
    let months = remaining / monthly_contribution;
    if expected_return > 0.0 {
        months.ceil()
    } else {
        months
    }
}

/// Smallest whole month `n` where `C(1+i)^n + P((1+i)^n - 1)/i >= T`
///
/// Closed form: `n = ln((T·i + P) / (C·i + P)) / ln(1 + i)`.
fn compounding_months(goal: &SavingsGoal, monthly_contribution: f64, expected_return: f64) -> f64 {
    let monthly_rate = expected_return / 12.0;
    if monthly_rate <= 0.0 || !monthly_rate.is_finite() {
        return linear_months(goal.remaining(), monthly_contribution, expected_return);
    }

    let current = goal.current_amount.max(0.0);
    let numerator = goal.target_amount * monthly_rate + monthly_contribution;
    let denominator = current * monthly_rate + monthly_contribution;
    let months = (numerator / denominator).ln() / (1.0 + monthly_rate).ln();

    // Guard against ln noise pushing an exact month just over the boundary
    (months - 1e-9).ceil().max(0.0)
}
