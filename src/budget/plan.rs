//! Budget plan generation

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::category::BudgetCategory;
use crate::error::{EngineError, Result};
use crate::timevalue::{round_money, round_to};

/// Default share of income per category, as fractions of monthly income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetDefaults {
    allocations: Vec<(BudgetCategory, f64)>,
}

impl BudgetDefaults {
    /// Housing 30, Food 15, Transportation 10, Utilities 5, Healthcare 5,
    /// Entertainment 10, Savings 20, Debt 5 (percent; sums to 100)
    pub fn standard() -> Self {
        Self {
            allocations: vec![
                (BudgetCategory::Housing, 0.30),
                (BudgetCategory::Food, 0.15),
                (BudgetCategory::Transportation, 0.10),
                (BudgetCategory::Utilities, 0.05),
                (BudgetCategory::Healthcare, 0.05),
                (BudgetCategory::Entertainment, 0.10),
                (BudgetCategory::Savings, 0.20),
                (BudgetCategory::Debt, 0.05),
            ],
        }
    }

    /// Build from loaded rows, rejecting duplicates and invalid fractions
    pub fn from_allocations(allocations: Vec<(BudgetCategory, f64)>) -> Result<Self> {
        if allocations.is_empty() {
            return Err(EngineError::ReferenceData("budget defaults table is empty".to_string()));
        }

        let mut seen = Vec::with_capacity(allocations.len());
        for &(category, fraction) in &allocations {
            if seen.contains(&category) {
                return Err(EngineError::ReferenceData(format!(
                    "duplicate budget category '{}'",
                    category
                )));
            }
            if !fraction.is_finite() || fraction < 0.0 {
                return Err(EngineError::ReferenceData(format!(
                    "invalid default share {} for '{}'",
                    fraction, category
                )));
            }
            seen.push(category);
        }

        Ok(Self { allocations })
    }

    pub fn allocations(&self) -> &[(BudgetCategory, f64)] {
        &self.allocations
    }

    pub fn share(&self, category: BudgetCategory) -> Option<f64> {
        self.allocations
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, f)| *f)
    }

    pub fn total_share(&self) -> f64 {
        self.allocations.iter().map(|(_, f)| f).sum()
    }
}

impl Default for BudgetDefaults {
    fn default() -> Self {
        Self::standard()
    }
}

/// One line of a budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub category: BudgetCategory,

    pub amount: f64,

    /// Percent of monthly income (0-100), one decimal
    pub percentage: f64,
}

/// A monthly budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub monthly_income: f64,

    pub items: Vec<BudgetItem>,

    pub total_budget: f64,

    /// Income left unallocated; negative when over-allocated
    pub remaining_amount: f64,
}

impl BudgetPlan {
    pub fn item(&self, category: BudgetCategory) -> Option<&BudgetItem> {
        self.items.iter().find(|i| i.category == category)
    }
}

/// Allocate `monthly_income` across the default table
///
/// An override replaces that category's share outright. Overrides for categories
/// not in the table are ignored. Shares need not sum to 100%: the shortfall or
/// excess shows up in `remaining_amount`, unclamped.
pub fn generate(
    defaults: &BudgetDefaults,
    monthly_income: f64,
    overrides: &HashMap<BudgetCategory, f64>,
) -> Result<BudgetPlan> {
    if !monthly_income.is_finite() || monthly_income <= 0.0 {
        return Err(EngineError::invalid(
            "monthly_income",
            format!("must be greater than 0, got {monthly_income}"),
        ));
    }

    for (category, &fraction) in overrides {
        if !fraction.is_finite() || fraction < 0.0 {
            return Err(EngineError::invalid(
                category.as_str(),
                format!("share must not be negative, got {fraction}"),
            ));
        }
        if defaults.share(*category).is_none() {
            debug!("ignoring override for unbudgeted category '{}'", category);
        }
    }

    let mut items = Vec::with_capacity(defaults.allocations().len());
    let mut total_allocated = 0.0;

    for &(category, default_share) in defaults.allocations() {
        let share = overrides.get(&category).copied().unwrap_or(default_share);
        let amount = monthly_income * share;
        total_allocated += amount;

        items.push(BudgetItem {
            category,
            amount: round_money(amount),
            percentage: round_to(share * 100.0, 1),
        });
    }

    Ok(BudgetPlan {
        monthly_income,
        items,
        total_budget: round_money(total_allocated),
        remaining_amount: round_money(monthly_income - total_allocated),
    })
}

/// Build a plan from caller-chosen amounts
///
/// Unlike [`generate`], the caller is asking for a concrete plan, so allocating
/// more than the income is refused.
pub fn custom_plan(monthly_income: f64, amounts: &[(BudgetCategory, f64)]) -> Result<BudgetPlan> {
    if !monthly_income.is_finite() || monthly_income <= 0.0 {
        return Err(EngineError::invalid(
            "monthly_income",
            format!("must be greater than 0, got {monthly_income}"),
        ));
    }

    let mut items = Vec::with_capacity(amounts.len());
    let mut total_allocated = 0.0;

    for &(category, amount) in amounts {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EngineError::invalid(
                category.as_str(),
                format!("amount must be greater than 0, got {amount}"),
            ));
        }
        total_allocated += amount;
        items.push(BudgetItem {
            category,
            amount: round_money(amount),
            percentage: round_to(amount / monthly_income * 100.0, 1),
        });
    }

    if total_allocated > monthly_income {
        return Err(EngineError::BudgetExceedsIncome {
            allocated: total_allocated,
            income: monthly_income,
        });
    }

    Ok(BudgetPlan {
        monthly_income,
        items,
        total_budget: round_money(total_allocated),
        remaining_amount: round_money(monthly_income - total_allocated),
    })
}
