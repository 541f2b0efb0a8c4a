//! Loan amortization: fixed monthly payment and payment schedule

mod input;
mod schedule;
mod engine;

pub use input::LoanInput;
pub use schedule::{AmortizationPeriod, LoanResult};
pub use engine::{annuity_payment, compute_amortization, AmortizationEngine, ScheduleSampling};
