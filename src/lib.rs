//! CrediCalc - Loan amortization and savings projection engine
//!
//! This library provides:
//! - Fixed-rate loan amortization with full or sampled schedules
//! - Savings growth projections with monthly compounding
//! - Locale-aware currency, number and date formatting
//! - Portfolio summaries, batch scenarios and CSV export
//! - A JSON request/response contract for serving the engines

pub mod error;
pub mod term;
pub mod loan;
pub mod savings;
pub mod format;
pub mod config;
pub mod portfolio;
pub mod scenario;
pub mod export;
pub mod service;

// Re-export commonly used types
pub use error::FinanceError;
pub use loan::{
    compute_amortization, AmortizationEngine, AmortizationPeriod, LoanInput, LoanResult,
    ScheduleSampling,
};
pub use savings::{
    compute_projection, ProjectionEngine, ProjectionMethod, ProjectionPoint, SavingsInput,
    SavingsResult,
};
pub use format::{format_currency, format_date, Locale, NumberFormat};
pub use config::CalculatorConfig;
pub use portfolio::{summarize, NamedLoan, PortfolioSummary};
pub use scenario::ScenarioRunner;
