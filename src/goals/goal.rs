//! Savings goal records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 5;

/// Snapshot of a savings goal as handed over by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    /// Caller-assigned identifier (storage key), if any
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,

    pub target_amount: f64,

    /// May exceed the target once the goal is met
    pub current_amount: f64,

    pub target_date: NaiveDate,

    /// 1 (lowest) to 5 (highest)
    #[serde(deserialize_with = "clamp_priority")]
    pub priority: u8,
}

/// Out-of-range priorities read from storage are pulled into `[1, 5]`
fn clamp_priority<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(MIN_PRIORITY as i64, MAX_PRIORITY as i64) as u8)
}

impl SavingsGoal {
    /// Create a goal, clamping priority into `[1, 5]`
    pub fn new(
        name: impl Into<String>,
        target_amount: f64,
        current_amount: f64,
        target_date: NaiveDate,
        priority: u8,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            target_amount,
            current_amount,
            target_date,
            priority: priority.clamp(MIN_PRIORITY, MAX_PRIORITY),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Amount still to be saved (zero once the goal is met)
    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    pub fn is_met(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

/// Find a goal by id
pub fn find_goal<'a>(goals: &'a [SavingsGoal], id: &str) -> Result<&'a SavingsGoal> {
    goals
        .iter()
        .find(|g| g.id.as_deref() == Some(id))
        .ok_or_else(|| EngineError::GoalNotFound(id.to_string()))
}

/// Set the saved amount of a goal in the caller's collection
pub fn update_current_amount<'a>(
    goals: &'a mut [SavingsGoal],
    id: &str,
    amount: f64,
) -> Result<&'a SavingsGoal> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(EngineError::invalid("current_amount", format!("must not be negative, got {amount}")));
    }

    let goal = goals
        .iter_mut()
        .find(|g| g.id.as_deref() == Some(id))
        .ok_or_else(|| EngineError::GoalNotFound(id.to_string()))?;
    goal.current_amount = amount;
    Ok(goal)
}

/// Goals ordered from highest to lowest priority (ties keep their input order)
pub fn by_priority(goals: &[SavingsGoal]) -> Vec<&SavingsGoal> {
    let mut ordered: Vec<&SavingsGoal> = goals.iter().collect();
    ordered.sort_by(|a, b| b.priority.cmp(&a.priority));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goals() -> Vec<SavingsGoal> {
        vec![
            SavingsGoal::new("Car", 15_000.0, 2_000.0, date(2027, 6, 1), 2).with_id("car"),
            SavingsGoal::new("Emergency", 10_000.0, 10_500.0, date(2026, 12, 1), 5).with_id("ef"),
            SavingsGoal::new("Trip", 3_000.0, 0.0, date(2027, 1, 1), 2).with_id("trip"),
        ]
    }

    #[test]
    fn test_priority_clamped() {
        assert_eq!(SavingsGoal::new("a", 1.0, 0.0, date(2030, 1, 1), 0).priority, 1);
        assert_eq!(SavingsGoal::new("b", 1.0, 0.0, date(2030, 1, 1), 9).priority, 5);
        assert_eq!(SavingsGoal::new("c", 1.0, 0.0, date(2030, 1, 1), 3).priority, 3);
    }

    #[test]
    fn test_priority_clamped_when_deserialized() {
        let high: SavingsGoal = serde_json::from_str(
            r#"{"name": "Boat", "target_amount": 8000.0, "current_amount": 0.0, "target_date": "2028-05-01", "priority": 9}"#,
        )
        .unwrap();
        let low: SavingsGoal = serde_json::from_str(
            r#"{"name": "Bike", "target_amount": 900.0, "current_amount": 0.0, "target_date": "2027-03-01", "priority": -2}"#,
        )
        .unwrap();
        assert_eq!(high.priority, MAX_PRIORITY);
        assert_eq!(low.priority, MIN_PRIORITY);

        let mut all = goals();
        all.push(low);
        all.push(high);
        let ordered = by_priority(&all);
        assert_eq!(ordered[0].name, "Emergency");
        assert_eq!(ordered[1].name, "Boat");
        assert_eq!(ordered.last().unwrap().name, "Bike");
    }

    #[test]
    fn test_remaining_never_negative() {
        let goals = goals();
        assert_eq!(goals[0].remaining(), 13_000.0);
        assert_eq!(goals[1].remaining(), 0.0);
        assert!(goals[1].is_met());
    }

    #[test]
    fn test_find_goal() {
        let goals = goals();
        assert_eq!(find_goal(&goals, "trip").unwrap().name, "Trip");
        assert!(matches!(find_goal(&goals, "boat"), Err(EngineError::GoalNotFound(_))));
    }

    #[test]
    fn test_update_current_amount() {
        let mut goals = goals();
        let updated = update_current_amount(&mut goals, "car", 4_000.0).unwrap();
        assert_eq!(updated.current_amount, 4_000.0);
        assert_eq!(goals[0].current_amount, 4_000.0);

        assert!(update_current_amount(&mut goals, "car", -1.0).is_err());
        assert!(update_current_amount(&mut goals, "boat", 1.0).is_err());
    }

    #[test]
    fn test_by_priority_is_stable() {
        let goals = goals();
        let names: Vec<&str> = by_priority(&goals).iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Emergency", "Car", "Trip"]);
    }
}
