//! Loan request parameters

use crate::error::{require_finite, FinanceError};
use serde::{Deserialize, Serialize};

/// A fixed-rate, fixed-term loan to amortize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInput {
    /// Amount borrowed
    pub principal: f64,

    /// Nominal annual rate in percent (4.5 = 4.5%)
    pub annual_rate_percent: f64,

    /// Term in years; fractional terms are floored to whole months
    pub term_years: f64,
}

impl LoanInput {
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: f64) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
        }
    }

    /// Check principal and rate. The term is checked when it is converted
    /// to months.
    pub fn validate(&self) -> Result<(), FinanceError> {
        let principal = require_finite("principal", self.principal)?;
        let rate = require_finite("annualRatePercent", self.annual_rate_percent)?;

        if principal <= 0.0 {
            return Err(FinanceError::invalid(
                "principal",
                "principal must be positive",
            ));
        }
        // The annuity formula divides by (1+r)^n - 1, which is zero at r = 0
        if rate <= 0.0 {
            return Err(FinanceError::invalid(
                "annualRatePercent",
                "rate must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for LoanInput {
    /// Calculator reset values: $250,000 at 4.5% over 30 years
    fn default() -> Self {
        Self::new(250_000.0, 4.5, 30.0)
    }
}
