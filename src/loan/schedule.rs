//! Amortization output structures

use serde::{Deserialize, Serialize};

/// One month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationPeriod {
    /// 1-based month number
    pub period_index: u32,

    /// Portion of the payment that reduced the balance
    pub principal_paid: f64,

    /// Portion of the payment that went to interest
    pub interest_paid: f64,

    /// Balance after this payment, never negative
    pub remaining_balance: f64,
}

/// Complete amortization result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    /// Fixed monthly payment from the annuity formula
    pub monthly_payment: f64,

    /// Interest over every period, including periods not kept in `schedule`
    pub total_interest: f64,

    /// Principal plus total interest
    pub total_paid: f64,

    /// Number of monthly payments
    pub total_periods: u32,

    /// Emitted periods, in increasing `period_index` order
    pub schedule: Vec<AmortizationPeriod>,
}

impl LoanResult {
    /// Principal recovered from the totals
    pub fn principal(&self) -> f64 {
        self.total_paid - self.total_interest
    }

    /// Last emitted period
    pub fn final_period(&self) -> Option<&AmortizationPeriod> {
        self.schedule.last()
    }

    /// Principal share of all emitted periods
    pub fn scheduled_principal(&self) -> f64 {
        self.schedule.iter().map(|p| p.principal_paid).sum()
    }

    /// Interest share of all emitted periods
    pub fn scheduled_interest(&self) -> f64 {
        self.schedule.iter().map(|p| p.interest_paid).sum()
    }

    /// Look up an emitted period by month number
    pub fn period(&self, period_index: u32) -> Option<&AmortizationPeriod> {
        self.schedule
            .binary_search_by_key(&period_index, |p| p.period_index)
            .ok()
            .map(|i| &self.schedule[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LoanResult {
        LoanResult {
            monthly_payment: 100.0,
            total_interest: 20.0,
            total_paid: 220.0,
            total_periods: 2,
            schedule: vec![
                AmortizationPeriod {
                    period_index: 1,
                    principal_paid: 90.0,
                    interest_paid: 10.0,
                    remaining_balance: 110.0,
                },
                AmortizationPeriod {
                    period_index: 2,
                    principal_paid: 110.0,
                    interest_paid: 10.0,
                    remaining_balance: 0.0,
                },
            ],
        }
    }

    #[test]
    fn test_accessors() {
        let result = sample();
        assert_eq!(result.principal(), 200.0);
        assert_eq!(result.final_period().unwrap().period_index, 2);
        assert_eq!(result.scheduled_principal(), 200.0);
        assert_eq!(result.scheduled_interest(), 20.0);
        assert_eq!(result.period(2).unwrap().principal_paid, 110.0);
        assert!(result.period(3).is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("monthlyPayment").is_some());
        assert_eq!(json["schedule"][0]["periodIndex"], 1);
        assert!(json["schedule"][0].get("remainingBalance").is_some());
    }
}
