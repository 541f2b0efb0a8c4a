//! Dashboard summary across several loans
//!
//! Aggregates the figures shown on the dashboard cards: total borrowed,
//! combined monthly payment and the average rate, weighted by principal.

use crate::error::FinanceError;
use crate::loan::{AmortizationEngine, LoanInput, ScheduleSampling};
use log::debug;
use serde::{Deserialize, Serialize};

/// A loan with a display name, e.g. "Auto Loan"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedLoan {
    pub name: String,
    #[serde(flatten)]
    pub loan: LoanInput,
}

impl NamedLoan {
    pub fn new(name: impl Into<String>, loan: LoanInput) -> Self {
        Self {
            name: name.into(),
            loan,
        }
    }
}

/// Per-loan line of the summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanBreakdown {
    pub name: String,
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_periods: u32,
}

/// Totals across all loans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_principal: f64,
    pub total_monthly_payment: f64,
    pub total_interest: f64,
    /// Annual rate in percent, weighted by principal
    pub average_rate_percent: f64,
    pub loans: Vec<LoanBreakdown>,
}

impl PortfolioSummary {
    /// Loan with the largest monthly payment
    pub fn largest_payment(&self) -> Option<&LoanBreakdown> {
        self.loans
            .iter()
            .max_by(|a, b| a.monthly_payment.total_cmp(&b.monthly_payment))
    }
}

/// Summarize a set of loans. Fails if the set is empty or any loan is
/// invalid; the error names the offending loan.
pub fn summarize(loans: &[NamedLoan]) -> Result<PortfolioSummary, FinanceError> {
    if loans.is_empty() {
        return Err(FinanceError::invalid("loans", "portfolio must contain at least one loan"));
    }

    // Totals only, so skip materializing schedules beyond the final period
    let engine = AmortizationEngine::new(ScheduleSampling::Every(u32::MAX));
    let mut breakdown = Vec::with_capacity(loans.len());

    for named in loans {
        let result = engine.compute(&named.loan).map_err(|e| {
            FinanceError::invalid(
                format!("loans[{}].{}", named.name, e.field()),
                e.reason(),
            )
        })?;
        breakdown.push(LoanBreakdown {
            name: named.name.clone(),
            principal: named.loan.principal,
            annual_rate_percent: named.loan.annual_rate_percent,
            monthly_payment: result.monthly_payment,
            total_interest: result.total_interest,
            total_periods: result.total_periods,
        });
    }

    let total_principal: f64 = breakdown.iter().map(|l| l.principal).sum();
    let total_monthly_payment: f64 = breakdown.iter().map(|l| l.monthly_payment).sum();
    let total_interest: f64 = breakdown.iter().map(|l| l.total_interest).sum();
    let weighted_rate: f64 = breakdown
        .iter()
        .map(|l| l.principal * l.annual_rate_percent)
        .sum();

    debug!(
        "summarized {} loans: principal={:.2} monthly={:.2}",
        breakdown.len(),
        total_principal,
        total_monthly_payment
    );

    Ok(PortfolioSummary {
        total_principal,
        total_monthly_payment,
        total_interest,
        average_rate_percent: weighted_rate / total_principal,
        loans: breakdown,
    })
}
