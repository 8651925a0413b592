//! Error types for the planning engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown scenario type: {0}")]
    UnknownScenario(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Total budget allocation {allocated:.2} cannot exceed monthly income {income:.2}")]
    BudgetExceedsIncome { allocated: f64, income: f64 },

    #[error("Savings goal not found: {0}")]
    GoalNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reference data error: {0}")]
    ReferenceData(String),
}

impl EngineError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for problems with the caller's input, as opposed to environment faults
    /// (unreadable or malformed reference files).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::UnknownScenario(_)
                | EngineError::InvalidParameters(_)
                | EngineError::InvalidParameter { .. }
                | EngineError::BudgetExceedsIncome { .. }
                | EngineError::GoalNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_tiers() {
        assert!(EngineError::UnknownScenario("lottery".into()).is_client_error());
        assert!(EngineError::invalid("years", "must be non-negative").is_client_error());
        assert!(EngineError::GoalNotFound("42".into()).is_client_error());

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(!EngineError::from(io).is_client_error());
        assert!(!EngineError::ReferenceData("empty table".into()).is_client_error());
    }

    #[test]
    fn test_messages_name_the_field() {
        let err = EngineError::invalid("return_rate", "must be between 0 and 0.2");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'return_rate': must be between 0 and 0.2"
        );
    }
}
