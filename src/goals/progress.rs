//! Aggregate progress across a set of goals

use serde::{Deserialize, Serialize};

use super::goal::SavingsGoal;
use crate::timevalue::{round_money, round_to};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsProgress {
    /// Saved as a share of all targets, one decimal
    pub progress_percentage: f64,
    pub total_target: f64,
    pub total_current: f64,
    pub remaining_amount: f64,
    pub goals_count: usize,
}

/// Sum targets and balances over the caller's goals
pub fn savings_progress(goals: &[SavingsGoal]) -> SavingsProgress {
    let total_target: f64 = goals.iter().map(|g| g.target_amount).sum();
    let total_current: f64 = goals.iter().map(|g| g.current_amount).sum();

    let progress_percentage = if total_target > 0.0 {
        round_to(total_current / total_target * 100.0, 1)
    } else {
        0.0
    };

    SavingsProgress {
        progress_percentage,
        total_target: round_money(total_target),
        total_current: round_money(total_current),
        remaining_amount: round_money(total_target - total_current),
        goals_count: goals.len(),
    }
}
