//! Savings request parameters

use crate::error::{require_finite, FinanceError};
use serde::{Deserialize, Serialize};

/// A savings plan: a deposit now plus a fixed contribution every month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsInput {
    /// Opening deposit at month 0
    pub initial_deposit: f64,

    /// Added at the start of every month, before interest
    pub monthly_contribution: f64,

    /// Nominal annual rate in percent, compounded monthly
    pub annual_rate_percent: f64,

    /// Term in years
    pub term_years: f64,
}

impl SavingsInput {
    pub fn new(
        initial_deposit: f64,
        monthly_contribution: f64,
        annual_rate_percent: f64,
        term_years: f64,
    ) -> Self {
        Self {
            initial_deposit,
            monthly_contribution,
            annual_rate_percent,
            term_years,
        }
    }

    /// Reject negative or non-finite amounts and rates. Zero is allowed for
    /// all three.
    pub fn validate(&self) -> Result<(), FinanceError> {
        let fields = [
            ("initialDeposit", self.initial_deposit, "initial deposit must not be negative"),
            (
                "monthlyContribution",
                self.monthly_contribution,
                "monthly contribution must not be negative",
            ),
            ("annualRatePercent", self.annual_rate_percent, "rate must not be negative"),
        ];

        for (field, value, reason) in fields {
            if require_finite(field, value)? < 0.0 {
                return Err(FinanceError::invalid(field, reason));
            }
        }
        Ok(())
    }
}

impl Default for SavingsInput {
    /// Calculator reset values: $5,000 plus $500/month at 5.5% for 10 years
    fn default() -> Self {
        Self::new(5_000.0, 500.0, 5.5, 10.0)
    }
}
