//! Budget-vs-actual variance analysis

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category::BudgetCategory;
use super::plan::BudgetPlan;
use crate::error::{EngineError, Result};
use crate::timevalue::{round_money, round_to};

/// A spent amount in a category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub category: BudgetCategory,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianceStatus {
    Over,
    Under,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    OnTrack,
    OverBudget,
    UnderBudget,
}

/// Comparison for one budget line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryVariance {
    pub category: BudgetCategory,
    pub budgeted: f64,
    pub actual: f64,
    /// `actual - budgeted`; positive means overspent
    pub difference: f64,
    /// `actual / budgeted * 100`, or 0 for an unbudgeted line
    pub percentage_used: f64,
    pub status: VarianceStatus,
}

/// Variance report for a whole plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAnalysis {
    pub overall_status: OverallStatus,
    /// One entry per plan line, in plan order
    pub categories: Vec<CategoryVariance>,
    pub total_overspend: f64,
    pub total_underspend: f64,
    /// Spending in categories the plan has no line for
    pub unbudgeted_spending: f64,
    pub recommendations: Vec<String>,
}

impl ExpenseRecord {
    pub fn validate(&self) -> Result<()> {
        require_expense_amount(self.category.as_str(), self.amount)
    }
}

/// Spent amounts must be finite and greater than 0
pub(crate) fn require_expense_amount(label: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(EngineError::invalid(
            "amount",
            format!("expense '{}' must be greater than 0, got {}", label, amount),
        ));
    }
    Ok(())
}

impl BudgetAnalysis {
    pub fn category(&self, category: BudgetCategory) -> Option<&CategoryVariance> {
        self.categories.iter().find(|c| c.category == category)
    }
}

/// Total actual spending per category
///
/// Records are summed as given; run [`ExpenseRecord::validate`] first on untrusted input.
pub fn spending_by_category(expenses: &[ExpenseRecord]) -> BTreeMap<BudgetCategory, f64> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category).or_insert(0.0) += expense.amount;
    }
    totals
}

/// Compare actual spending with a plan
///
/// Overspend in any line makes the plan `over_budget`. Otherwise the plan is
/// `under_budget` when total underspend exceeds the plan's unallocated remainder,
/// else `on_track`.
pub fn analyze(plan: &BudgetPlan, actual_expenses: &[ExpenseRecord]) -> Result<BudgetAnalysis> {
    for expense in actual_expenses {
        expense.validate()?;
    }

    let actual_by_category = spending_by_category(actual_expenses);

    let mut categories = Vec::with_capacity(plan.items.len());
    let mut recommendations = Vec::new();
    let mut total_overspend = 0.0;
    let mut total_underspend = 0.0;

    for item in &plan.items {
        let budgeted = item.amount;
        let actual = actual_by_category.get(&item.category).copied().unwrap_or(0.0);
        let difference = actual - budgeted;

        let percentage_used = if budgeted > 0.0 {
            actual / budgeted * 100.0
        } else {
            0.0
        };

        let status = if difference > 0.0 {
            total_overspend += difference;
            recommendations.push(format!(
                "Consider reducing {} expenses by ${:.2}",
                item.category,
                difference.abs()
            ));
            VarianceStatus::Over
        } else {
            total_underspend += -difference;
            VarianceStatus::Under
        };

        categories.push(CategoryVariance {
            category: item.category,
            budgeted,
            actual: round_money(actual),
            difference: round_money(difference),
            percentage_used: round_to(percentage_used, 1),
            status,
        });
    }

    let unbudgeted_spending: f64 = actual_by_category
        .iter()
        .filter(|(category, _)| plan.item(**category).is_none())
        .map(|(_, amount)| amount)
        .sum();

    let overall_status = if total_overspend > 0.0 {
        OverallStatus::OverBudget
    } else if total_underspend > plan.remaining_amount {
        recommendations.push("Great job! You're under budget. Consider increasing savings.".to_string());
        OverallStatus::UnderBudget
    } else {
        OverallStatus::OnTrack
    };

    Ok(BudgetAnalysis {
        overall_status,
        categories,
        total_overspend: round_money(total_overspend),
        total_underspend: round_money(total_underspend),
        unbudgeted_spending: round_money(unbudgeted_spending),
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::plan::{generate, BudgetDefaults};
    use std::collections::HashMap;

    fn plan(income: f64) -> BudgetPlan {
        generate(&BudgetDefaults::standard(), income, &HashMap::new()).unwrap()
    }

    fn spent(category: BudgetCategory, amount: f64) -> ExpenseRecord {
        ExpenseRecord { category, amount }
    }

    #[test]
    fn test_overspend_detected() {
        let plan = plan(5_000.0);
        let expenses = vec![
            spent(BudgetCategory::Food, 500.0),
            spent(BudgetCategory::Food, 400.0),
            spent(BudgetCategory::Housing, 1_500.0),
        ];

        let report = analyze(&plan, &expenses).unwrap();
        assert_eq!(report.overall_status, OverallStatus::OverBudget);
        assert_eq!(report.total_overspend, 150.0);

        let food = report.category(BudgetCategory::Food).unwrap();
        assert_eq!(food.actual, 900.0);
        assert_eq!(food.difference, 150.0);
        assert_eq!(food.percentage_used, 120.0);
        assert_eq!(food.status, VarianceStatus::Over);

        let housing = report.category(BudgetCategory::Housing).unwrap();
        assert_eq!(housing.status, VarianceStatus::Under);
        assert_eq!(housing.percentage_used, 100.0);

        assert_eq!(report.recommendations, vec!["Consider reducing food expenses by $150.00"]);
    }

    #[test]
    fn test_never_over_budget_when_every_line_fits() {
        let plan = plan(4_200.0);
        let expenses: Vec<ExpenseRecord> = plan
            .items
            .iter()
            .map(|i| spent(i.category, i.amount * 0.75))
            .chain(plan.items.iter().map(|i| spent(i.category, i.amount * 0.25)))
            .collect();

        let report = analyze(&plan, &expenses).unwrap();
        assert_ne!(report.overall_status, OverallStatus::OverBudget);
        assert_eq!(report.total_overspend, 0.0);
    }

    #[test]
    fn test_exact_spend_is_on_track() {
        let plan = plan(3_000.0);
        let expenses: Vec<ExpenseRecord> = plan.items.iter().map(|i| spent(i.category, i.amount)).collect();

        let report = analyze(&plan, &expenses).unwrap();
        assert_eq!(report.overall_status, OverallStatus::OnTrack);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_underspend_beyond_remainder() {
        let plan = plan(3_000.0);
        let report = analyze(&plan, &[spent(BudgetCategory::Housing, 100.0)]).unwrap();

        assert_eq!(report.overall_status, OverallStatus::UnderBudget);
        assert_eq!(report.total_underspend, 2_900.0);
        assert!(report.recommendations[0].starts_with("Great job!"));
    }

    #[test]
    fn test_zero_budget_line_and_unbudgeted_spend() {
        let overrides = HashMap::from([(BudgetCategory::Entertainment, 0.0)]);
        let plan = generate(&BudgetDefaults::standard(), 2_000.0, &overrides).unwrap();

        let report = analyze(
            &plan,
            &[
                spent(BudgetCategory::Entertainment, 50.0),
                spent(BudgetCategory::Other, 75.0),
            ],
        )
        .unwrap();

        let fun = report.category(BudgetCategory::Entertainment).unwrap();
        assert_eq!(fun.percentage_used, 0.0);
        assert_eq!(fun.status, VarianceStatus::Over);
        assert_eq!(report.unbudgeted_spending, 75.0);
        assert_eq!(report.overall_status, OverallStatus::OverBudget);
    }

    #[test]
    fn test_rejects_unusable_amounts() {
        let plan = plan(5_000.0);
        for bad in [f64::NAN, f64::INFINITY, -900.0, 0.0] {
            let err = analyze(&plan, &[spent(BudgetCategory::Food, 300.0), spent(BudgetCategory::Housing, bad)])
                .unwrap_err();
            assert!(err.is_client_error(), "{} should be rejected", bad);
        }
    }
}
