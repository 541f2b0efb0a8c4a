//! Fixed-payment amortization engine

use super::input::LoanInput;
use super::schedule::{AmortizationPeriod, LoanResult};
use crate::error::FinanceError;
use crate::term::{monthly_rate, whole_months, MONTHS_PER_YEAR};
use log::debug;
use serde::{Deserialize, Serialize};

/// Which periods to keep in the emitted schedule.
///
/// Sampling only affects `LoanResult::schedule`; totals always cover every
/// period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleSampling {
    /// Every month
    #[default]
    Full,
    /// Month 1, every `n`th month, and the final month
    Every(u32),
}

impl ScheduleSampling {
    /// One row per year, as plotted on the amortization chart
    pub const YEARLY: ScheduleSampling = ScheduleSampling::Every(MONTHS_PER_YEAR);

    /// Build from an optional stride where `None` or 1 mean every month
    pub fn from_stride(stride: Option<u32>) -> Self {
        match stride {
            None | Some(1) => ScheduleSampling::Full,
            Some(n) => ScheduleSampling::Every(n),
        }
    }

    fn validate(&self) -> Result<(), FinanceError> {
        match self {
            ScheduleSampling::Every(0) => Err(FinanceError::invalid(
                "samplingStride",
                "sampling stride must be at least 1",
            )),
            _ => Ok(()),
        }
    }

    /// Whether `period` of `total_periods` is emitted
    pub fn includes(&self, period: u32, total_periods: u32) -> bool {
        match *self {
            ScheduleSampling::Full => true,
            ScheduleSampling::Every(n) => {
                period == 1 || period == total_periods || (n > 0 && period % n == 0)
            }
        }
    }
}

/// Level monthly payment that fully repays `principal` over `periods` months.
///
/// `rate` is the monthly periodic rate and must be positive.
pub fn annuity_payment(principal: f64, rate: f64, periods: u32) -> f64 {
    // 1 - (1+r)^-n, kept accurate for tiny r and bounded for huge r
    let repaid_fraction = -(-(periods as f64) * rate.ln_1p()).exp_m1();
    principal * rate / repaid_fraction
}

/// Largest leftover balance, relative to principal, written off as rounding
/// on the final payment
const RESIDUAL_TOLERANCE: f64 = 1e-6;

/// Amortization engine configured with a sampling policy
#[derive(Debug, Clone, Copy, Default)]
pub struct AmortizationEngine {
    sampling: ScheduleSampling,
}

impl AmortizationEngine {
    pub fn new(sampling: ScheduleSampling) -> Self {
        Self { sampling }
    }

    pub fn sampling(&self) -> ScheduleSampling {
        self.sampling
    }

    /// Amortize a loan.
    ///
    /// All inputs are validated before the first period is computed.
    pub fn compute(&self, input: &LoanInput) -> Result<LoanResult, FinanceError> {
        input.validate()?;
        let total_periods = whole_months(input.term_years)?;
        self.sampling.validate()?;

        let rate = monthly_rate(input.annual_rate_percent);
        let monthly_payment = annuity_payment(input.principal, rate, total_periods);
        if !monthly_payment.is_finite() {
            return Err(FinanceError::invalid(
                "annualRatePercent",
                "rate is outside the computable range",
            ));
        }

        debug!(
            "amortizing principal={} rate={}% periods={} payment={:.2}",
            input.principal, input.annual_rate_percent, total_periods, monthly_payment
        );

        let capacity = match self.sampling {
            ScheduleSampling::Full => total_periods as usize,
            ScheduleSampling::Every(n) => (total_periods / n) as usize + 2,
        };
        let mut schedule = Vec::with_capacity(capacity);
        let mut balance = input.principal;
        let mut total_interest = 0.0;

        for period in 1..=total_periods {
            let interest_paid = balance * rate;
            let principal_paid = monthly_payment - interest_paid;
            let next_balance = balance - principal_paid;
            total_interest += interest_paid;

            if period == total_periods {
                // Drift on the last payment is rounding; anything larger means
                // the rate cannot be amortized in floating point over this term
                if next_balance.abs() > RESIDUAL_TOLERANCE * input.principal {
                    return Err(FinanceError::invalid(
                        "annualRatePercent",
                        "rate is too high to amortize over this term",
                    ));
                }
                balance = 0.0;
            } else {
                balance = next_balance.max(0.0);
            }

            if self.sampling.includes(period, total_periods) {
                schedule.push(AmortizationPeriod {
                    period_index: period,
                    principal_paid,
                    interest_paid,
                    remaining_balance: balance,
                });
            }
        }

        debug!(
            "amortization complete: {} rows, total interest {:.2}",
            schedule.len(),
            total_interest
        );

        Ok(LoanResult {
            monthly_payment,
            total_interest,
            total_paid: input.principal + total_interest,
            total_periods,
            schedule,
        })
    }
}

/// Amortize `input`, keeping the periods selected by `sampling`.
pub fn compute_amortization(
    input: &LoanInput,
    sampling: ScheduleSampling,
) -> Result<LoanResult, FinanceError> {
    AmortizationEngine::new(sampling).compute(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_thirty_year_mortgage() {
        let input = LoanInput::new(250_000.0, 4.5, 30.0);
        let result = compute_amortization(&input, ScheduleSampling::Full).unwrap();

        assert_relative_eq!(result.monthly_payment, 1266.71, epsilon = 0.01);
        assert_eq!(result.total_periods, 360);
        assert_eq!(result.schedule.len(), 360);
        assert_eq!(result.final_period().unwrap().remaining_balance, 0.0);
        assert_relative_eq!(result.total_interest, 206_016.78, epsilon = 0.01);
        assert_relative_eq!(
            result.total_paid,
            result.monthly_payment * 360.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_high_rate_short_term() {
        let input = LoanInput::new(8_900_000.0, 20.0, 4.0);
        let result = compute_amortization(&input, ScheduleSampling::Full).unwrap();

        let rate = 0.20 / 12.0;
        let growth = (1.0_f64 + rate).powi(48);
        let expected = 8_900_000.0 * rate * growth / (growth - 1.0);
        assert_relative_eq!(result.monthly_payment, expected, max_relative = 1e-12);
        assert_relative_eq!(result.monthly_payment, 270_830.22, epsilon = 0.01);
        assert_eq!(result.schedule.len(), 48);
    }

    #[test]
    fn test_first_period_split() {
        let input = LoanInput::new(250_000.0, 4.5, 30.0);
        let result = compute_amortization(&input, ScheduleSampling::Full).unwrap();
        let first = result.schedule[0];

        assert_eq!(first.period_index, 1);
        assert_relative_eq!(first.interest_paid, 937.5, epsilon = 1e-9);
        assert_relative_eq!(
            first.principal_paid,
            result.monthly_payment - 937.5,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            first.remaining_balance,
            250_000.0 - first.principal_paid,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_balance_non_increasing() {
        let input = LoanInput::new(15_000.0, 7.9, 3.0);
        let result = compute_amortization(&input, ScheduleSampling::Full).unwrap();
        for pair in result.schedule.windows(2) {
            assert!(pair[1].remaining_balance <= pair[0].remaining_balance);
            assert!(pair[1].period_index > pair[0].period_index);
        }
    }

    #[test]
    fn test_yearly_sampling_keeps_totals() {
        let input = LoanInput::new(250_000.0, 4.5, 30.0);
        let full = compute_amortization(&input, ScheduleSampling::Full).unwrap();
        let yearly = compute_amortization(&input, ScheduleSampling::YEARLY).unwrap();

        // month 1 plus 30 year ends
        assert_eq!(yearly.schedule.len(), 31);
        assert_eq!(yearly.schedule[0].period_index, 1);
        assert_eq!(yearly.schedule[1].period_index, 12);
        assert_eq!(yearly.final_period().unwrap().period_index, 360);
        assert_eq!(yearly.total_interest, full.total_interest);
        assert_eq!(yearly.monthly_payment, full.monthly_payment);
        assert_eq!(yearly.period(120), full.period(120));
    }

    #[test]
    fn test_sampling_includes_final_partial_year() {
        let input = LoanInput::new(10_000.0, 6.0, 2.5);
        let result = compute_amortization(&input, ScheduleSampling::YEARLY).unwrap();
        let months: Vec<u32> = result.schedule.iter().map(|p| p.period_index).collect();
        assert_eq!(months, vec![1, 12, 24, 30]);
    }

    #[test]
    fn test_zero_stride_rejected() {
        let input = LoanInput::default();
        let err = compute_amortization(&input, ScheduleSampling::Every(0)).unwrap_err();
        assert_eq!(err.field(), "samplingStride");
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let err = compute_amortization(&LoanInput::new(0.0, 4.5, 30.0), ScheduleSampling::Full)
            .unwrap_err();
        assert_eq!(err.reason(), "principal must be positive");

        let err = compute_amortization(&LoanInput::new(1000.0, 0.0, 30.0), ScheduleSampling::Full)
            .unwrap_err();
        assert_eq!(err.reason(), "rate must be positive");

        let err = compute_amortization(&LoanInput::new(1000.0, 5.0, 0.0), ScheduleSampling::Full)
            .unwrap_err();
        assert_eq!(err.reason(), "term must be positive");

        let err = compute_amortization(&LoanInput::new(1000.0, 5.0, 0.04), ScheduleSampling::Full)
            .unwrap_err();
        assert_eq!(err.reason(), "term must cover at least one month");
    }

    #[test]
    fn test_single_month_loan() {
        let input = LoanInput::new(1200.0, 12.0, 1.0 / 12.0);
        let result = compute_amortization(&input, ScheduleSampling::Full).unwrap();
        assert_eq!(result.total_periods, 1);
        assert_relative_eq!(result.monthly_payment, 1212.0, epsilon = 1e-9);
        assert_relative_eq!(result.total_interest, 12.0, epsilon = 1e-9);
        assert_eq!(result.schedule[0].remaining_balance, 0.0);
    }

    #[test]
    fn test_tiny_rates_repay_principal() {
        for rate_percent in [1e-9, 1e-12, 1e-14] {
            let input = LoanInput::new(100_000.0, rate_percent, 30.0);
            let result = compute_amortization(&input, ScheduleSampling::Full).unwrap();

            assert_relative_eq!(result.monthly_payment, 100_000.0 / 360.0, max_relative = 1e-6);
            assert_relative_eq!(result.scheduled_principal(), 100_000.0, max_relative = 1e-9);
            assert_relative_eq!(
                result.total_paid,
                result.monthly_payment * 360.0,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_extreme_rate_rejected() {
        let input = LoanInput::new(100_000.0, 100_000.0, 100.0);
        let err = compute_amortization(&input, ScheduleSampling::Full).unwrap_err();
        assert_eq!(err.field(), "annualRatePercent");

        let input = LoanInput::new(1e300, 1e300, 30.0);
        assert!(compute_amortization(&input, ScheduleSampling::Full).is_err());
    }

    #[test]
    fn test_annuity_payment_matches_closed_form() {
        let rate = 0.045 / 12.0;
        let growth = (1.0_f64 + rate).powi(360);
        let expected = 250_000.0 * rate * growth / (growth - 1.0);
        assert_relative_eq!(annuity_payment(250_000.0, rate, 360), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_from_stride() {
        assert_eq!(ScheduleSampling::from_stride(None), ScheduleSampling::Full);
        assert_eq!(ScheduleSampling::from_stride(Some(1)), ScheduleSampling::Full);
        assert_eq!(
            ScheduleSampling::from_stride(Some(12)),
            ScheduleSampling::YEARLY
        );
    }
}
