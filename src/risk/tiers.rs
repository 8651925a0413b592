//! Risk tiers and their reference portfolios

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Coarse tolerance for investment volatility, ordered `Low < Medium < High`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskTier::Low),
            "medium" => Ok(RiskTier::Medium),
            "high" => Ok(RiskTier::High),
            other => Err(EngineError::invalid("risk_tolerance", format!("unknown risk tier '{}'", other))),
        }
    }
}

/// Share of the portfolio in one asset class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetWeight {
    pub asset: String,
    pub percent: u32,
}

/// A candidate holding for a tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub risk: String,
    /// Percent per year
    pub expected_return: f64,
}

/// Reference portfolio for a tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierProfile {
    pub description: String,
    pub asset_allocation: Vec<AssetWeight>,
    pub candidate_instruments: Vec<Instrument>,
    /// Percent per year
    pub expected_return: f64,
}

/// Static tier → portfolio table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskTable {
    low: TierProfile,
    medium: TierProfile,
    high: TierProfile,
}

fn weights(pairs: &[(&str, u32)]) -> Vec<AssetWeight> {
    pairs
        .iter()
        .map(|&(asset, percent)| AssetWeight {
            asset: asset.to_string(),
            percent,
        })
        .collect()
}

fn instruments(rows: &[(&str, &str, &str, f64)]) -> Vec<Instrument> {
    rows.iter()
        .map(|&(name, kind, risk, expected_return)| Instrument {
            name: name.to_string(),
            kind: kind.to_string(),
            risk: risk.to_string(),
            expected_return,
        })
        .collect()
}

impl RiskTable {
    /// Built-in portfolios
    pub fn standard() -> Self {
        Self {
            low: TierProfile {
                description: "Conservative approach focusing on capital preservation".to_string(),
                asset_allocation: weights(&[("bonds", 70), ("stocks", 20), ("cash", 10)]),
                candidate_instruments: instruments(&[
                    ("Government Bonds", "Bond", "Low", 3.5),
                    ("High-Yield Savings", "Cash", "Very Low", 2.0),
                    ("Blue Chip Stocks", "Stock", "Low", 6.0),
                    ("REITs", "Real Estate", "Low-Medium", 5.5),
                ]),
                expected_return: 4.0,
            },
            medium: TierProfile {
                description: "Balanced approach with moderate risk and growth potential".to_string(),
                asset_allocation: weights(&[("stocks", 60), ("bonds", 30), ("alternatives", 10)]),
                candidate_instruments: instruments(&[
                    ("S&P 500 Index Fund", "Stock", "Medium", 8.0),
                    ("Corporate Bonds", "Bond", "Low-Medium", 4.5),
                    ("International Stocks", "Stock", "Medium", 7.5),
                    ("Commodity ETFs", "Alternative", "Medium", 6.0),
                ]),
                expected_return: 6.5,
            },
            high: TierProfile {
                description: "Aggressive approach focusing on long-term growth".to_string(),
                asset_allocation: weights(&[("stocks", 80), ("alternatives", 15), ("bonds", 5)]),
                candidate_instruments: instruments(&[
                    ("Growth Stocks", "Stock", "High", 12.0),
                    ("Small Cap Stocks", "Stock", "High", 10.0),
                    ("Emerging Markets", "Stock", "Very High", 9.0),
                    ("Cryptocurrency", "Alternative", "Very High", 15.0),
                ]),
                expected_return: 10.0,
            },
        }
    }

    pub fn profile(&self, tier: RiskTier) -> &TierProfile {
        match tier {
            RiskTier::Low => &self.low,
            RiskTier::Medium => &self.medium,
            RiskTier::High => &self.high,
        }
    }
}

impl Default for RiskTable {
    fn default() -> Self {
        Self::standard()
    }
}
