//! Savings goal planning
//!
//! Goals are always passed in by the caller; nothing here keeps a collection.

mod goal;
mod planner;
mod progress;

pub use goal::{by_priority, find_goal, update_current_amount, SavingsGoal, MAX_PRIORITY, MIN_PRIORITY};
pub use planner::{
    monthly_target_for, months_until, predict_goal_achievement, EstimateMode, GoalPrediction,
    DEFAULT_EXPECTED_RETURN, MAX_REASONABLE_YEARS,
};
pub use progress::{savings_progress, SavingsProgress};
