//! Risk scoring, suitability adjustment and investment recommendations

use serde::{Deserialize, Serialize};

use super::tiers::{AssetWeight, Instrument, RiskTable, RiskTier};
use crate::error::{EngineError, Result};

/// Goals that justify a little more risk
pub const AGGRESSIVE_GOALS: [&str; 3] = ["retirement", "wealth_building", "early_retirement"];

/// Minimum score for each tier
const HIGH_CUTOFF: u32 = 5;
const MEDIUM_CUTOFF: u32 = 3;

/// What the caller knows about the investor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFinancialProfile {
    pub age: u32,
    /// Annual income
    pub income: f64,
    pub risk_tolerance: RiskTier,
    /// Investment horizon in years
    pub time_horizon: u32,
    #[serde(default)]
    pub goals: Vec<String>,
}

impl UserFinancialProfile {
    /// Admission checks for the calculators
    pub fn validate(&self) -> Result<()> {
        if !(18..=100).contains(&self.age) {
            return Err(EngineError::invalid("age", format!("must be between 18 and 100, got {}", self.age)));
        }
        if !self.income.is_finite() || self.income <= 0.0 {
            return Err(EngineError::invalid("income", format!("must be greater than 0, got {}", self.income)));
        }
        if self.time_horizon < 1 {
            return Err(EngineError::invalid("time_horizon", "must be at least 1 year"));
        }
        Ok(())
    }
}

/// Personalised portfolio suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentRecommendation {
    pub risk_level: RiskTier,
    pub asset_allocation: Vec<AssetWeight>,
    pub recommended_investments: Vec<Instrument>,
    /// Percent per year
    pub expected_return: f64,
    pub risk_description: String,
}

fn is_aggressive_goal(goal: &str) -> bool {
    let goal = goal.trim().to_lowercase();
    AGGRESSIVE_GOALS.contains(&goal.as_str())
}

/// Additive score from age, income, horizon and goals
///
/// Age: <30 +3, <40 +2, <50 +1. Income: >100k +2, >50k +1.
/// Horizon: >10y +2, >5y +1. Any aggressive goal: +1.
pub fn risk_score<S: AsRef<str>>(age: u32, income: f64, time_horizon: u32, goals: &[S]) -> u32 {
    let mut score = 0;

    score += match age {
        0..=29 => 3,
        30..=39 => 2,
        40..=49 => 1,
        _ => 0,
    };

    if income > 100_000.0 {
        score += 2;
    } else if income > 50_000.0 {
        score += 1;
    }

    if time_horizon > 10 {
        score += 2;
    } else if time_horizon > 5 {
        score += 1;
    }

    if goals.iter().any(|g| is_aggressive_goal(g.as_ref())) {
        score += 1;
    }

    score
}

/// Map the raw score to a tier
pub fn classify<S: AsRef<str>>(age: u32, income: f64, time_horizon: u32, goals: &[S]) -> RiskTier {
    let score = risk_score(age, income, time_horizon, goals);
    if score >= HIGH_CUTOFF {
        RiskTier::High
    } else if score >= MEDIUM_CUTOFF {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Suitability guardrails applied after scoring
///
/// High drops to Medium near retirement (age > 60) or on short horizons (< 3y);
/// Low rises to Medium for young investors (age < 30). Applying it twice changes nothing.
pub fn adjust_for_profile(tier: RiskTier, age: u32, time_horizon: u32) -> RiskTier {
    match tier {
        RiskTier::High if age > 60 || time_horizon < 3 => RiskTier::Medium,
        RiskTier::Low if age < 30 => RiskTier::Medium,
        other => other,
    }
}

/// Portfolio for the profile's stated tolerance after suitability adjustment
pub fn recommend(table: &RiskTable, profile: &UserFinancialProfile) -> Result<InvestmentRecommendation> {
    profile.validate()?;

    let tier = adjust_for_profile(profile.risk_tolerance, profile.age, profile.time_horizon);
    let portfolio = table.profile(tier);

    Ok(InvestmentRecommendation {
        risk_level: tier,
        asset_allocation: portfolio.asset_allocation.clone(),
        recommended_investments: portfolio.candidate_instruments.clone(),
        expected_return: portfolio.expected_return,
        risk_description: portfolio.description.clone(),
    })
}
