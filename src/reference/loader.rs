//! File-based reference loader
//!
//! Reads the tables in `data/reference/`:
//! - `budget_defaults.csv`: `category,percentage` (percent of monthly income)
//! - `financial_terms.json`: `{"term": "definition", ...}`

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::budget::{BudgetCategory, BudgetDefaults};
use crate::error::{EngineError, Result};

/// Default path to the reference directory
pub const DEFAULT_REFERENCE_PATH: &str = "data/reference";

pub const BUDGET_DEFAULTS_FILE: &str = "budget_defaults.csv";
pub const FINANCIAL_TERMS_FILE: &str = "financial_terms.json";

#[derive(Debug, Deserialize)]
struct BudgetDefaultRow {
    category: String,
    percentage: f64,
}

/// Parse budget defaults from any CSV source
pub fn load_budget_defaults_from_reader<R: Read>(reader: R) -> Result<BudgetDefaults> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut allocations = Vec::new();

    for row in reader.deserialize() {
        let row: BudgetDefaultRow = row?;
        let category: BudgetCategory = row.category.parse().map_err(|_| {
            EngineError::ReferenceData(format!(
                "unknown budget category '{}' in {}",
                row.category, BUDGET_DEFAULTS_FILE
            ))
        })?;
        allocations.push((category, row.percentage / 100.0));
    }

    debug!("read {} budget default rows", allocations.len());
    BudgetDefaults::from_allocations(allocations)
}

/// Load `budget_defaults.csv` from a reference directory
pub fn load_budget_defaults(dir: &Path) -> Result<BudgetDefaults> {
    let file = File::open(dir.join(BUDGET_DEFAULTS_FILE))?;
    load_budget_defaults_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentages_become_fractions() {
        let csv = "category,percentage\nhousing,40\nFood,25\nsavings,35\n";
        let defaults = load_budget_defaults_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(defaults.allocations().len(), 3);
        assert_eq!(defaults.share(BudgetCategory::Housing), Some(0.4));
        assert_eq!(defaults.share(BudgetCategory::Food), Some(0.25));
        assert_eq!(defaults.share(BudgetCategory::Debt), None);
    }

    #[test]
    fn test_unknown_category_is_an_error() {
        let csv = "category,percentage\nyachts,10\n";
        let err = load_budget_defaults_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, EngineError::ReferenceData(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_duplicate_category_is_an_error() {
        let csv = "category,percentage\nfood,10\nfood,20\n";
        let err = load_budget_defaults_from_reader(csv.as_bytes()).unwrap_err();
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_missing_directory() {
        assert!(load_budget_defaults(Path::new("/nonexistent/reference")).is_err());
    }
}
