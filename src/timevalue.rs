//! Time-value-of-money arithmetic shared by every projection
//!
//! Lump sums compound annually over fractional years; recurring contributions are
//! treated as an ordinary annuity (payments at the end of each month) at `r / 12`.
//! Nothing in here rounds: callers round once at the edge of a public operation
//! with [`round_money`] so composed calculations don't accumulate rounding error.

use serde::{Deserialize, Serialize};

/// Sanity ceiling for user-supplied annual returns (20%)
pub const MAX_EXPECTED_RETURN: f64 = 0.20;

/// Monthly rates below this are treated as zero
const ZERO_RATE_EPSILON: f64 = 1e-12;

/// Future value of a single present amount after `months`, compounding annually
///
/// `pv * (1 + r)^(months / 12)`
pub fn fv_lump_sum(present_value: f64, annual_rate: f64, months: u32) -> f64 {
    let years = months as f64 / 12.0;
    present_value * (1.0 + annual_rate).powf(years)
}

/// Future value of a level monthly contribution (ordinary annuity)
///
/// `pmt * ((1 + r_m)^n - 1) / r_m` with `r_m = r / 12`, or `pmt * n` when `r_m` is zero.
pub fn fv_annuity(monthly_payment: f64, annual_rate: f64, months: u32) -> f64 {
    let monthly_rate = annual_rate / 12.0;
    if monthly_rate.abs() < ZERO_RATE_EPSILON {
        return monthly_payment * months as f64;
    }

    monthly_payment * ((1.0 + monthly_rate).powi(months as i32) - 1.0) / monthly_rate
}

/// Future value of a starting balance plus monthly contributions
pub fn future_value(present_value: f64, monthly_payment: f64, annual_rate: f64, months: u32) -> f64 {
    fv_lump_sum(present_value, annual_rate, months) + fv_annuity(monthly_payment, annual_rate, months)
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Round a monetary amount to cents
pub fn round_money(value: f64) -> f64 {
    round_to(value, 2)
}

/// Outcome of projecting a balance with contributions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Balance at the end of the horizon
    pub future_value: f64,

    /// Sum of the monthly contributions (starting balance excluded)
    pub total_contributions: f64,

    /// `future_value - present_value - total_contributions`
    pub growth: f64,
}

impl Projection {
    /// Copy with every field rounded to cents
    pub fn rounded(&self) -> Self {
        Self {
            future_value: round_money(self.future_value),
            total_contributions: round_money(self.total_contributions),
            growth: round_money(self.growth),
        }
    }
}

/// Project `present_value` and `monthly_payment` forward `months` at `annual_rate`
pub fn project(present_value: f64, monthly_payment: f64, annual_rate: f64, months: u32) -> Projection {
    let fv = future_value(present_value, monthly_payment, annual_rate, months);
    let total_contributions = monthly_payment * months as f64;

    Projection {
        future_value: fv,
        total_contributions,
        growth: fv - present_value - total_contributions,
    }
}
