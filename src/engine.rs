//! Planning engine facade
//!
//! Holds the reference tables once and exposes every calculation behind a
//! single value, so callers never thread tables through by hand.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use log::debug;
use serde_json::{Map, Value};

use crate::advice::{self, PersonalizedAdvice, SmartAnalysis};
use crate::budget::{self, BudgetAnalysis, BudgetCategory, BudgetPlan, ExpenseRecord};
use crate::error::{EngineError, Result};
use crate::goals::{self, EstimateMode, GoalPrediction, SavingsGoal, SavingsProgress, DEFAULT_EXPECTED_RETURN};
use crate::lexicon::TermLookup;
use crate::reference::ReferenceData;
use crate::responder::{KeywordResponder, TextResponder};
use crate::risk::{self, InvestmentRecommendation, RiskTier, UserFinancialProfile};
use crate::scenario::{self, require_rate, ScenarioDescriptor, ScenarioKind, ScenarioOutcome};

/// Pre-loaded engine for repeated planning calls
///
/// # Example
/// ```ignore
/// let engine = PlanningEngine::from_dir(Path::new("data/reference"))?;
///
/// let plan = engine.generate_budget(5000.0, &HashMap::new())?;
/// let analysis = engine.analyze_budget(&plan, &expenses)?;
/// ```
pub struct PlanningEngine {
    reference: ReferenceData,
    responder: Box<dyn TextResponder>,
}

impl PlanningEngine {
    /// Engine over the built-in tables
    pub fn new() -> Self {
        Self::with_reference(ReferenceData::default_tables())
    }

    /// Engine over tables read from a reference directory
    pub fn from_dir(path: &Path) -> Result<Self> {
        Ok(Self::with_reference(ReferenceData::from_dir(path)?))
    }

    pub fn with_reference(reference: ReferenceData) -> Self {
        Self {
            reference,
            responder: Box::new(KeywordResponder::standard()),
        }
    }

    /// Swap the free-text responder
    pub fn with_responder(mut self, responder: impl TextResponder + 'static) -> Self {
        self.responder = Box::new(responder);
        self
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn available_scenarios(&self) -> Vec<ScenarioDescriptor> {
        ScenarioKind::catalog()
    }

    pub fn simulate_scenario(&self, scenario_type: &str, parameters: &Map<String, Value>) -> Result<ScenarioOutcome> {
        scenario::simulate_scenario(scenario_type, parameters)
    }

    /// Default allocation with per-category share overrides (fractions)
    pub fn generate_budget(
        &self,
        monthly_income: f64,
        overrides: &HashMap<BudgetCategory, f64>,
    ) -> Result<BudgetPlan> {
        debug!("generating budget for {:.2} with {} override(s)", monthly_income, overrides.len());
        budget::generate(&self.reference.budget, monthly_income, overrides)
    }

    pub fn custom_budget(&self, monthly_income: f64, items: &[(BudgetCategory, f64)]) -> Result<BudgetPlan> {
        budget::custom_plan(monthly_income, items)
    }

    /// Every expense amount must be finite and greater than 0
    pub fn analyze_budget(&self, plan: &BudgetPlan, actual_expenses: &[ExpenseRecord]) -> Result<BudgetAnalysis> {
        budget::analyze(plan, actual_expenses)
    }

    /// Time to reach a goal; `expected_return` defaults to 5% a year
    pub fn predict_goal_achievement(
        &self,
        goal: &SavingsGoal,
        monthly_contribution: f64,
        expected_return: Option<f64>,
        mode: EstimateMode,
    ) -> Result<GoalPrediction> {
        if !monthly_contribution.is_finite() {
            return Err(EngineError::invalid("monthly_contribution", "must be a finite number"));
        }
        let expected_return = expected_return.unwrap_or(DEFAULT_EXPECTED_RETURN);
        require_rate("expected_return", expected_return)?;

        debug!(
            "predicting goal '{}' at {:.2}/month, {:.3} return, {:?}",
            goal.name, monthly_contribution, expected_return, mode
        );
        Ok(goals::predict_goal_achievement(goal, monthly_contribution, expected_return, mode))
    }

    pub fn savings_progress(&self, goals: &[SavingsGoal]) -> SavingsProgress {
        goals::savings_progress(goals)
    }

    /// Score-based tier before any suitability adjustment
    pub fn classify_risk<S: AsRef<str>>(&self, age: u32, income: f64, time_horizon: u32, goals: &[S]) -> RiskTier {
        risk::classify(age, income, time_horizon, goals)
    }

    pub fn recommend_investments(&self, profile: &UserFinancialProfile) -> Result<InvestmentRecommendation> {
        risk::recommend(&self.reference.risk, profile)
    }

    pub fn personalized_advice(
        &self,
        profile: &UserFinancialProfile,
        spending: &BTreeMap<BudgetCategory, f64>,
    ) -> Result<PersonalizedAdvice> {
        advice::personalized_advice(profile, spending)
    }

    pub fn smart_analysis(
        &self,
        profile: &UserFinancialProfile,
        expenses: &[ExpenseRecord],
        goals: &[SavingsGoal],
    ) -> Result<SmartAnalysis> {
        advice::smart_analysis(profile, expenses, goals)
    }

    pub fn lookup_term(&self, term: &str) -> TermLookup {
        self.reference.lexicon.lookup(term)
    }

    pub fn respond(&self, text: &str) -> String {
        self.responder.generate(text)
    }
}

impl Default for PlanningEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use serde_json::json;

    fn engine() -> PlanningEngine {
        PlanningEngine::new()
    }

    fn goal(target: f64, current: f64) -> SavingsGoal {
        SavingsGoal::new("Emergency fund", target, current, NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(), 3)
    }

    fn params(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_default_budget_uses_all_income() {
        let plan = engine().generate_budget(5000.0, &HashMap::new()).unwrap();
        let total: f64 = plan.items.iter().map(|i| i.amount).sum();
        assert_relative_eq!(total, 5000.0, epsilon = 1e-9);
        assert_eq!(plan.remaining_amount, 0.0);
        assert_eq!(plan.item(BudgetCategory::Housing).map(|i| i.amount), Some(1500.0));
    }

    #[test]
    fn test_budget_within_plan_is_never_over() {
        let e = engine();
        let plan = e.generate_budget(4000.0, &HashMap::new()).unwrap();
        let expenses: Vec<ExpenseRecord> = plan
            .items
            .iter()
            .map(|i| ExpenseRecord {
                category: i.category,
                amount: i.amount * 0.9,
            })
            .collect();
        let analysis = e.analyze_budget(&plan, &expenses).unwrap();
        assert_ne!(analysis.overall_status, budget::OverallStatus::OverBudget);
        assert_eq!(analysis.total_overspend, 0.0);
    }

    #[test]
    fn test_goal_prediction_defaults() {
        let e = engine();
        let p = e.predict_goal_achievement(&goal(1200.0, 0.0), 100.0, None, EstimateMode::Linear).unwrap();
        assert!(p.achievable);
        assert_eq!(p.months_to_goal, Some(12.0));
        assert_eq!(p.expected_return, DEFAULT_EXPECTED_RETURN);

        let done = e.predict_goal_achievement(&goal(500.0, 500.0), 50.0, None, EstimateMode::Linear).unwrap();
        assert!(done.achievable);
        assert_eq!(done.months_to_goal, Some(0.0));
    }

    #[test]
    fn test_goal_prediction_rejects_bad_rates() {
        let e = engine();
        let g = goal(1200.0, 0.0);
        assert!(e.predict_goal_achievement(&g, 100.0, Some(0.5), EstimateMode::Linear).is_err());
        assert!(e.predict_goal_achievement(&g, 100.0, Some(-0.01), EstimateMode::Compounding).is_err());
        assert!(e.predict_goal_achievement(&g, f64::NAN, None, EstimateMode::Linear).is_err());
    }

    #[test]
    fn test_classify_and_recommend() {
        let e = engine();
        assert_eq!(e.classify_risk(25, 120_000.0, 15, &["retirement"]), RiskTier::High);

        let profile = UserFinancialProfile {
            age: 25,
            income: 40_000.0,
            risk_tolerance: RiskTier::Low,
            time_horizon: 30,
            goals: vec![],
        };
        let rec = e.recommend_investments(&profile).unwrap();
        assert_eq!(rec.risk_level, RiskTier::Medium);
    }

    #[test]
    fn test_scenario_dispatch() {
        let e = engine();
        let outcome = e.simulate_scenario("savings_rate", &Map::new()).unwrap();
        assert_eq!(outcome.kind(), ScenarioKind::SavingsRate);

        let err = e.simulate_scenario("lottery", &Map::new()).unwrap_err();
        assert!(matches!(err, EngineError::UnknownScenario(_)));

        let err = e
            .simulate_scenario("retirement", &params(json!({"current_age": "thirty"})))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameters(_)));
        assert!(err.is_client_error());

        let err = e
            .simulate_scenario("retirement", &params(json!({"retirement_age": 400_000_000u64})))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_catalog_lists_every_scenario() {
        let catalog = engine().available_scenarios();
        assert_eq!(catalog.len(), ScenarioKind::ALL.len());
    }

    #[test]
    fn test_term_lookup_and_respond() {
        let e = engine();
        assert!(e.lookup_term("401(k)").found);
        assert!(!e.lookup_term("zzz").found);
        assert!(e.respond("any budget tips?").contains("50/30/20"));
    }

    struct Echo;

    impl TextResponder for Echo {
        fn generate(&self, text: &str) -> String {
            text.to_uppercase()
        }
    }

    #[test]
    fn test_custom_responder() {
        let e = engine().with_responder(Echo);
        assert_eq!(e.respond("hi"), "HI");
    }
}
