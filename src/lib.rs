//! Planning Engine - Personal financial projection and budgeting
//!
//! This library provides:
//! - Time-value-of-money primitives (lump sum and annuity growth)
//! - What-if scenarios (savings rate, return comparison, retirement)
//! - Savings goal prediction and progress tracking
//! - Budget generation, variance analysis and expense summaries
//! - Risk-tier classification and tier-based investment suggestions
//! - A financial term dictionary and rule-based advice

pub mod advice;
pub mod budget;
pub mod engine;
pub mod error;
pub mod goals;
pub mod lexicon;
pub mod reference;
pub mod responder;
pub mod risk;
pub mod scenario;
pub mod timevalue;

// Re-export commonly used types
pub use engine::PlanningEngine;
pub use error::{EngineError, Result};
pub use goals::{EstimateMode, GoalPrediction, SavingsGoal};
pub use budget::{BudgetCategory, BudgetPlan, ExpenseRecord};
pub use reference::ReferenceData;
pub use risk::{RiskTier, UserFinancialProfile};
pub use scenario::{ScenarioKind, ScenarioOutcome};
