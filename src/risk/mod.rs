//! Risk-tier classification and tier-based investment suggestions
//!
//! Classification runs in two passes: an additive score captures general
//! tolerance, then [`adjust_for_profile`] applies hard suitability limits for
//! investors near retirement or with short horizons.

mod profiler;
mod tiers;

pub use profiler::{
    adjust_for_profile, classify, recommend, risk_score, InvestmentRecommendation, UserFinancialProfile,
    AGGRESSIVE_GOALS,
};
pub use tiers::{AssetWeight, Instrument, RiskTable, RiskTier, TierProfile};
