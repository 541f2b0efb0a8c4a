//! Error type shared by the calculation engines

use thiserror::Error;

/// Errors raised by the loan, savings and formatting functions.
///
/// Every error is a caller-input error detected before any iteration starts,
/// so a failed call never produces a partial schedule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinanceError {
    #[error("invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },
}

impl FinanceError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FinanceError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending input field
    pub fn field(&self) -> &str {
        match self {
            FinanceError::InvalidInput { field, .. } => field,
        }
    }

    /// Human-readable reason, without the field prefix
    pub fn reason(&self) -> &str {
        match self {
            FinanceError::InvalidInput { reason, .. } => reason,
        }
    }
}

/// Reject NaN and infinite values for `field`.
pub(crate) fn require_finite(field: &str, value: f64) -> Result<f64, FinanceError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FinanceError::invalid(field, "must be a finite number"))
    }
}
