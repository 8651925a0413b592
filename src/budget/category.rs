//! Budget categories

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Spending category
///
/// The first eight make up the default budget; `Other` collects expenses
/// that don't fit any planned category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Housing,
    Food,
    Transportation,
    Utilities,
    Healthcare,
    Entertainment,
    Savings,
    Debt,
    Other,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 9] = [
        BudgetCategory::Housing,
        BudgetCategory::Food,
        BudgetCategory::Transportation,
        BudgetCategory::Utilities,
        BudgetCategory::Healthcare,
        BudgetCategory::Entertainment,
        BudgetCategory::Savings,
        BudgetCategory::Debt,
        BudgetCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetCategory::Housing => "housing",
            BudgetCategory::Food => "food",
            BudgetCategory::Transportation => "transportation",
            BudgetCategory::Utilities => "utilities",
            BudgetCategory::Healthcare => "healthcare",
            BudgetCategory::Entertainment => "entertainment",
            BudgetCategory::Savings => "savings",
            BudgetCategory::Debt => "debt",
            BudgetCategory::Other => "other",
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetCategory {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        BudgetCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| EngineError::invalid("category", format!("unknown budget category '{}'", s)))
    }
}
