//! Financial term dictionary
//!
//! Terms are stored under a normalized key: trimmed, lower-cased, and with every
//! run of non-alphanumeric characters replaced by a single `_`. So `"401(k)"`
//! becomes `"401_k_"` and `"Roth IRA"` becomes `"roth_ira"`. Normalizing a key
//! twice gives the same key.

use std::collections::BTreeMap;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Suggestions returned on a miss
pub const MAX_SUGGESTIONS: usize = 5;

/// Result of a term lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermLookup {
    /// The term as the caller wrote it
    pub term: String,
    pub definition: String,
    pub found: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub similar_terms: Vec<String>,
}

/// Read-only term → definition table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermLexicon {
    terms: BTreeMap<String, String>,
}

/// Canonical form used for storage and lookup
pub fn normalize(term: &str) -> String {
    let mut key = String::with_capacity(term.len());
    let mut in_separator = false;

    for ch in term.trim().chars() {
        if ch.is_alphanumeric() {
            key.extend(ch.to_lowercase());
            in_separator = false;
        } else if !in_separator {
            key.push('_');
            in_separator = true;
        }
    }

    key
}

impl TermLexicon {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from `(term, definition)` pairs, normalizing keys
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let terms = entries
            .into_iter()
            .map(|(k, v)| (normalize(k.as_ref()), v.into()))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        Self { terms }
    }

    /// Parse a JSON object of `{"term": "definition"}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        Ok(Self::from_entries(raw))
    }

    /// Load from a JSON file, falling back to an empty lexicon
    ///
    /// A missing or malformed file is not fatal: every lookup then reports
    /// not-found, and calculation paths are unaffected.
    pub fn load_or_empty(path: &Path) -> Self {
        let loaded = std::fs::read_to_string(path)
            .map_err(crate::error::EngineError::from)
            .and_then(|json| Self::from_json_str(&json));

        match loaded {
            Ok(lexicon) => {
                info!("loaded {} financial terms from {}", lexicon.len(), path.display());
                lexicon
            }
            Err(e) => {
                warn!("term lexicon unavailable ({}): {}; lookups will report not found", path.display(), e);
                Self::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// All stored (normalized) keys, sorted
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    pub fn definition(&self, term: &str) -> Option<&str> {
        self.terms.get(&normalize(term)).map(String::as_str)
    }

    /// Exact lookup, with substring suggestions on a miss
    pub fn lookup(&self, term: &str) -> TermLookup {
        let key = normalize(term);

        if let Some(definition) = self.terms.get(&key) {
            return TermLookup {
                term: term.to_string(),
                definition: definition.clone(),
                found: true,
                similar_terms: Vec::new(),
            };
        }

        TermLookup {
            term: term.to_string(),
            definition: format!("Term '{}' not found in database.", term),
            found: false,
            similar_terms: self.similar(&key),
        }
    }

    /// Stored keys that contain the query or are contained in it
    fn similar(&self, key: &str) -> Vec<String> {
        if key.is_empty() {
            return Vec::new();
        }

        self.terms
            .keys()
            .filter(|stored| stored.contains(key) || key.contains(stored.as_str()))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }
}
