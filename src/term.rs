//! Conversion of a term in years into whole monthly periods

use crate::error::{require_finite, FinanceError};

/// Months per year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest accepted term. Keeps every loop bounded to 1200 iterations.
pub const MAX_TERM_YEARS: f64 = 100.0;

/// Absorbs representation error such as `(1.0 / 12.0) * 12.0 == 0.999...`
const MONTH_EPSILON: f64 = 1e-9;

/// Number of whole months covered by `term_years`.
///
/// Fractional terms are floored to whole months. A term that is not positive,
/// exceeds [`MAX_TERM_YEARS`], or covers less than one month is rejected.
pub fn whole_months(term_years: f64) -> Result<u32, FinanceError> {
    let term_years = require_finite("termYears", term_years)?;
    if term_years <= 0.0 {
        return Err(FinanceError::invalid("termYears", "term must be positive"));
    }
    if term_years > MAX_TERM_YEARS {
        return Err(FinanceError::invalid(
            "termYears",
            format!("term must not exceed {} years", MAX_TERM_YEARS),
        ));
    }

    let months = (term_years * MONTHS_PER_YEAR as f64 + MONTH_EPSILON).floor() as u32;
    if months == 0 {
        return Err(FinanceError::invalid(
            "termYears",
            "term must cover at least one month",
        ));
    }
    Ok(months)
}

/// Monthly periodic rate from an annual percentage (4.5 -> 0.00375)
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / MONTHS_PER_YEAR as f64
}
