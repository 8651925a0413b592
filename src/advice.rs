//! Rule-based personal advice built from the calculators
//!
//! Everything here is a fixed rule table keyed on age, income and spending;
//! there is no model behind it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::budget::{spending_by_category, BudgetCategory, ExpenseRecord};
use crate::error::Result;
use crate::goals::{predict_goal_achievement, EstimateMode, GoalPrediction, SavingsGoal, DEFAULT_EXPECTED_RETURN};
use crate::risk::{RiskTier, UserFinancialProfile};
use crate::timevalue::{round_money, round_to};

/// Contribution levels tried for every goal in a smart analysis
pub const CONTRIBUTION_LEVELS: [f64; 4] = [100.0, 200.0, 500.0, 1000.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub advice: String,
    pub priority: Priority,
}

/// Financial-health risk (distinct from investment risk tolerance)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessment {
    pub risk_level: RiskTier,
    pub risk_score: i32,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedAdvice {
    pub personalized_recommendations: Vec<Recommendation>,
    pub risk_assessment: HealthAssessment,
    pub priority_actions: Vec<String>,
    pub long_term_strategy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionPrediction {
    pub monthly_contribution: f64,
    pub prediction: GoalPrediction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalAnalysis {
    pub goal_name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub predictions: Vec<ContributionPrediction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingAnalysis {
    pub total_spending: f64,
    pub spending_by_category: BTreeMap<BudgetCategory, f64>,
    /// Share of monthly income left after spending
    pub savings_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartAnalysis {
    pub personalized_advice: PersonalizedAdvice,
    pub goal_analyses: Vec<GoalAnalysis>,
    pub spending_analysis: SpendingAnalysis,
    /// Sum of the goals' saved amounts
    pub current_savings: f64,
}

fn monthly_income(profile: &UserFinancialProfile) -> f64 {
    profile.income / 12.0
}

fn total_spending(spending: &BTreeMap<BudgetCategory, f64>) -> f64 {
    spending.values().sum()
}

/// Score how exposed the household is to a financial shock
///
/// Age <30 +1, >60 +3; income <30k +2, >100k -1; monthly spending above monthly
/// income +3; income-to-spending ratio below 3 +2. Score <=2 Low, <=4 Medium, else High.
pub fn assess_financial_health(
    profile: &UserFinancialProfile,
    spending: &BTreeMap<BudgetCategory, f64>,
) -> HealthAssessment {
    let mut score = 0;
    let mut factors = Vec::new();

    if profile.age < 30 {
        score += 1;
    } else if profile.age > 60 {
        score += 3;
    }

    if profile.income < 30_000.0 {
        score += 2;
    } else if profile.income > 100_000.0 {
        score -= 1;
    }

    let spent = total_spending(spending);
    if spent > monthly_income(profile) {
        score += 3;
        factors.push("Spending exceeds income".to_string());
    }

    if spent > 0.0 {
        // Crude emergency-fund proxy: income relative to monthly spending
        let coverage = monthly_income(profile) / (spent / 12.0);
        if coverage < 3.0 {
            score += 2;
            factors.push("Insufficient emergency fund".to_string());
        }
    }

    let level = if score <= 2 {
        RiskTier::Low
    } else if score <= 4 {
        RiskTier::Medium
    } else {
        RiskTier::High
    };

    HealthAssessment {
        risk_level: level,
        risk_score: score,
        risk_factors: factors,
        recommendations: health_recommendations(level),
    }
}

fn health_recommendations(level: RiskTier) -> Vec<String> {
    let lines: &[&str] = match level {
        RiskTier::Low => &[
            "Continue current financial practices",
            "Consider increasing investment allocation",
            "Focus on long-term wealth building",
        ],
        RiskTier::Medium => &[
            "Build emergency fund to 3-6 months expenses",
            "Review and optimize spending",
            "Consider professional financial advice",
        ],
        RiskTier::High => &[
            "Immediately reduce spending",
            "Build emergency fund as priority",
            "Consider debt consolidation",
            "Seek professional financial counseling",
        ],
    };
    lines.iter().map(|s| s.to_string()).collect()
}

/// Life-stage and income-band advice plus a savings-rate action
pub fn personalized_advice(
    profile: &UserFinancialProfile,
    spending: &BTreeMap<BudgetCategory, f64>,
) -> Result<PersonalizedAdvice> {
    profile.validate()?;

    let mut recommendations = Vec::new();

    let (category, advice) = if profile.age < 30 {
        (
            "Early Career",
            "Focus on building an emergency fund and starting retirement savings early. Time is your biggest advantage for compound growth.",
        )
    } else if profile.age < 50 {
        (
            "Mid Career",
            "Maximize retirement contributions and consider diversifying your investment portfolio.",
        )
    } else {
        (
            "Pre-Retirement",
            "Focus on capital preservation and consider more conservative investments as you approach retirement.",
        )
    };
    recommendations.push(Recommendation {
        category: category.to_string(),
        advice: advice.to_string(),
        priority: Priority::High,
    });

    let (category, advice, priority) = if profile.income < 50_000.0 {
        (
            "Budget Optimization",
            "Focus on the 50/30/20 rule: 50% needs, 30% wants, 20% savings. Every dollar saved now has significant future value.",
            Priority::Medium,
        )
    } else if profile.income < 100_000.0 {
        (
            "Wealth Building",
            "Consider maxing out employer 401k matching and building a diversified investment portfolio.",
            Priority::Medium,
        )
    } else {
        (
            "Advanced Planning",
            "Consider tax-advantaged accounts, estate planning, and advanced investment strategies.",
            Priority::Low,
        )
    };
    recommendations.push(Recommendation {
        category: category.to_string(),
        advice: advice.to_string(),
        priority,
    });

    let mut priority_actions = Vec::new();
    let spent = total_spending(spending);
    if spent > 0.0 {
        let rate = savings_rate(profile, spent);
        let action = if rate < 0.1 {
            "Increase savings rate to at least 10% of income"
        } else if rate < 0.2 {
            "Great job! Consider increasing to 20% for optimal wealth building"
        } else {
            "Excellent savings rate! Focus on optimizing investment returns"
        };
        priority_actions.push(action.to_string());
    }

    Ok(PersonalizedAdvice {
        personalized_recommendations: recommendations,
        risk_assessment: assess_financial_health(profile, spending),
        priority_actions,
        long_term_strategy: long_term_strategy(profile),
    })
}

fn savings_rate(profile: &UserFinancialProfile, monthly_spending: f64) -> f64 {
    let income = monthly_income(profile);
    (income - monthly_spending) / income
}

fn long_term_strategy(profile: &UserFinancialProfile) -> String {
    let income = format_dollars(profile.income);
    if profile.age < 30 {
        format!(
            "Focus on building wealth through consistent investing. With your income of {}, aim to save 20% annually and invest in growth-oriented assets. Time is your biggest advantage.",
            income
        )
    } else if profile.age < 50 {
        format!(
            "Balance growth and stability. With your current income of {}, maximize retirement contributions and diversify your portfolio. Consider tax-advantaged accounts.",
            income
        )
    } else {
        format!(
            "Prioritize capital preservation and income generation. With your income of {}, focus on conservative investments and ensure you have adequate retirement savings.",
            income
        )
    }
}

/// Whole dollars with thousands separators, e.g. `$85,000`
fn format_dollars(amount: f64) -> String {
    let whole = amount.round().abs() as u64;
    let digits = whole.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Advice, per-goal predictions at several contribution levels, and a spending summary
pub fn smart_analysis(
    profile: &UserFinancialProfile,
    expenses: &[ExpenseRecord],
    goals: &[SavingsGoal],
) -> Result<SmartAnalysis> {
    for expense in expenses {
        expense.validate()?;
    }
    let spending = spending_by_category(expenses);
    let advice = personalized_advice(profile, &spending)?;

    let goal_analyses = goals
        .iter()
        .map(|goal| GoalAnalysis {
            goal_name: goal.name.clone(),
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            predictions: CONTRIBUTION_LEVELS
                .iter()
                .map(|&contribution| ContributionPrediction {
                    monthly_contribution: contribution,
                    prediction: predict_goal_achievement(
                        goal,
                        contribution,
                        DEFAULT_EXPECTED_RETURN,
                        EstimateMode::Linear,
                    ),
                })
                .collect(),
        })
        .collect();

    let spent = total_spending(&spending);
    let spending_analysis = SpendingAnalysis {
        total_spending: round_money(spent),
        spending_by_category: spending.iter().map(|(&c, &a)| (c, round_money(a))).collect(),
        savings_rate: round_to(savings_rate(profile, spent), 4),
    };

    Ok(SmartAnalysis {
        personalized_advice: advice,
        goal_analyses,
        spending_analysis,
        current_savings: round_money(goals.iter().map(|g| g.current_amount).sum()),
    })
}
