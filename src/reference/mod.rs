//! Static reference tables shared by every calculation
//!
//! Built once, either from the bundled defaults or from a directory, and then
//! only read. Calculators receive the table they need by reference.

pub mod loader;

pub use loader::{load_budget_defaults, load_budget_defaults_from_reader, DEFAULT_REFERENCE_PATH};

use std::path::Path;

use log::{info, warn};

use crate::budget::BudgetDefaults;
use crate::error::Result;
use crate::lexicon::TermLexicon;
use crate::risk::RiskTable;

const BUNDLED_TERMS: &str = include_str!("../../data/reference/financial_terms.json");

/// Container for all reference tables
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub budget: BudgetDefaults,
    pub risk: RiskTable,
    pub lexicon: TermLexicon,
}

impl ReferenceData {
    /// Built-in tables, including the bundled term dictionary
    pub fn default_tables() -> Self {
        let lexicon = TermLexicon::from_json_str(BUNDLED_TERMS).unwrap_or_else(|e| {
            warn!("bundled term dictionary unreadable: {}", e);
            TermLexicon::empty()
        });

        Self {
            budget: BudgetDefaults::standard(),
            risk: RiskTable::standard(),
            lexicon,
        }
    }

    /// Load tables from the default location (data/reference/)
    pub fn from_default_dir() -> Result<Self> {
        Self::from_dir(Path::new(DEFAULT_REFERENCE_PATH))
    }

    /// Load tables from a specific directory
    ///
    /// Budget defaults are required. A missing term dictionary only leaves the
    /// lexicon empty.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let budget = load_budget_defaults(dir)?;
        let lexicon = TermLexicon::load_or_empty(&dir.join(loader::FINANCIAL_TERMS_FILE));

        info!(
            "reference data loaded from {}: {} budget categories, {} terms",
            dir.display(),
            budget.allocations().len(),
            lexicon.len()
        );

        Ok(Self {
            budget,
            risk: RiskTable::standard(),
            lexicon,
        })
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::default_tables()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn bundled_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_REFERENCE_PATH)
    }

    #[test]
    fn test_default_tables() {
        let data = ReferenceData::default_tables();
        assert_eq!(data.budget, BudgetDefaults::standard());
        assert!(!data.lexicon.is_empty());
        assert!(data.lexicon.lookup("401(k)").found);
    }

    #[test]
    fn test_bundled_directory_matches_defaults() {
        let data = ReferenceData::from_dir(&bundled_dir()).unwrap();
        assert_eq!(data.budget.allocations().len(), 8);
        assert!((data.budget.total_share() - 1.0).abs() < 1e-9);
        assert_eq!(data.lexicon.len(), ReferenceData::default_tables().lexicon.len());
    }

    #[test]
    fn test_missing_directory_fails() {
        let err = ReferenceData::from_dir(Path::new("/nonexistent/reference")).unwrap_err();
        assert!(!err.is_client_error());
    }
}
