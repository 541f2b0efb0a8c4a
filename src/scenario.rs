//! Scenario runner for batch calculations
//!
//! Holds one engine configuration and evaluates many independent inputs on
//! the rayon thread pool. Results come back in input order.

use crate::config::CalculatorConfig;
use crate::error::FinanceError;
use crate::loan::{AmortizationEngine, LoanInput, LoanResult, ScheduleSampling};
use crate::savings::{ProjectionEngine, ProjectionMethod, SavingsInput, SavingsResult};
use log::info;
use rayon::prelude::*;

/// Result of one point in a rate sweep
#[derive(Debug, Clone)]
pub struct RateScenario<T> {
    pub annual_rate_percent: f64,
    pub result: Result<T, FinanceError>,
}

/// Pre-configured runner for batch projections
///
/// # Example
/// ```
/// use credicalc::{LoanInput, ScenarioRunner};
///
/// let runner = ScenarioRunner::new();
/// let sweep = runner.loan_rate_sweep(&LoanInput::default(), &[3.5, 4.5, 5.5]);
/// assert_eq!(sweep.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioRunner {
    loan_engine: AmortizationEngine,
    savings_engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Full schedules and incremental projections
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engines(sampling: ScheduleSampling, method: ProjectionMethod) -> Self {
        Self {
            loan_engine: AmortizationEngine::new(sampling),
            savings_engine: ProjectionEngine::new(method),
        }
    }

    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self::with_engines(config.sampling(), config.projection_method)
    }

    /// Amortize a single loan
    pub fn run_loan(&self, input: &LoanInput) -> Result<LoanResult, FinanceError> {
        self.loan_engine.compute(input)
    }

    /// Project a single savings plan
    pub fn run_savings(&self, input: &SavingsInput) -> Result<SavingsResult, FinanceError> {
        self.savings_engine.project(input)
    }

    /// Amortize many loans in parallel
    pub fn run_loan_batch(&self, inputs: &[LoanInput]) -> Vec<Result<LoanResult, FinanceError>> {
        info!("running {} loan calculations", inputs.len());
        inputs.par_iter().map(|input| self.run_loan(input)).collect()
    }

    /// Project many savings plans in parallel
    pub fn run_savings_batch(
        &self,
        inputs: &[SavingsInput],
    ) -> Vec<Result<SavingsResult, FinanceError>> {
        info!("running {} savings projections", inputs.len());
        inputs.par_iter().map(|input| self.run_savings(input)).collect()
    }

    /// Re-run one loan at several annual rates
    pub fn loan_rate_sweep(&self, base: &LoanInput, rates: &[f64]) -> Vec<RateScenario<LoanResult>> {
        rates
            .par_iter()
            .map(|&rate| RateScenario {
                annual_rate_percent: rate,
                result: self.run_loan(&LoanInput {
                    annual_rate_percent: rate,
                    ..*base
                }),
            })
            .collect()
    }

    /// Re-run one savings plan at several annual rates
    pub fn savings_rate_sweep(
        &self,
        base: &SavingsInput,
        rates: &[f64],
    ) -> Vec<RateScenario<SavingsResult>> {
        rates
            .par_iter()
            .map(|&rate| RateScenario {
                annual_rate_percent: rate,
                result: self.run_savings(&SavingsInput {
                    annual_rate_percent: rate,
                    ..*base
                }),
            })
            .collect()
    }
}
