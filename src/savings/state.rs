//! Running state of a savings simulation

use super::input::SavingsInput;
use super::projection::ProjectionPoint;

/// Account state at a month boundary
#[derive(Debug, Clone, Copy)]
pub struct SavingsState {
    /// Months simulated so far
    pub month: u32,

    pub balance: f64,

    /// Starts at the initial deposit
    pub contributions: f64,

    pub interest: f64,
}

impl SavingsState {
    /// State at month 0
    pub fn opening(input: &SavingsInput) -> Self {
        Self {
            month: 0,
            balance: input.initial_deposit,
            contributions: input.initial_deposit,
            interest: 0.0,
        }
    }

    /// Apply one month: contribution first, then interest on the new balance.
    pub fn advance_month(&mut self, contribution: f64, rate: f64) {
        self.month += 1;
        self.balance += contribution;
        self.contributions += contribution;

        let interest = self.balance * rate;
        self.balance += interest;
        self.interest += interest;
    }

    pub fn checkpoint(&self, year_index: u32) -> ProjectionPoint {
        ProjectionPoint {
            year_index,
            cumulative_contributions: self.contributions,
            cumulative_interest: self.interest,
            balance: self.balance,
        }
    }
}
