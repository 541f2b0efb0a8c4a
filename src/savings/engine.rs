//! Monthly-compounding savings projection engine

use super::input::SavingsInput;
use super::projection::{ProjectionPoint, SavingsResult};
use super::state::SavingsState;
use crate::error::FinanceError;
use crate::term::{monthly_rate, whole_months, MONTHS_PER_YEAR};
use log::debug;
use serde::{Deserialize, Serialize};

/// How yearly checkpoints are produced.
///
/// Both methods run the same floating-point operations in the same order,
/// so their output is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectionMethod {
    /// One pass over all months, O(term)
    #[default]
    Incremental,
    /// Re-simulate from month 0 for every checkpoint, O(years²)
    Restart,
}

/// Savings projection engine
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionEngine {
    method: ProjectionMethod,
}

impl ProjectionEngine {
    pub fn new(method: ProjectionMethod) -> Self {
        Self { method }
    }

    pub fn method(&self) -> ProjectionMethod {
        self.method
    }

    /// Project a savings plan year by year.
    pub fn project(&self, input: &SavingsInput) -> Result<SavingsResult, FinanceError> {
        input.validate()?;
        let total_months = whole_months(input.term_years)?;
        let rate = monthly_rate(input.annual_rate_percent);

        debug!(
            "projecting savings deposit={} monthly={} rate={}% months={} method={:?}",
            input.initial_deposit,
            input.monthly_contribution,
            input.annual_rate_percent,
            total_months,
            self.method
        );

        let projection = match self.method {
            ProjectionMethod::Incremental => project_incremental(input, rate, total_months),
            ProjectionMethod::Restart => project_restart(input, rate, total_months),
        };

        // whole_months guarantees at least one month, so at least one point
        let last = projection
            .last()
            .copied()
            .unwrap_or_else(|| SavingsState::opening(input).checkpoint(0));

        // Balance and its components only grow, so a finite final point
        // means every earlier point is finite too
        if !(last.balance.is_finite() && last.cumulative_interest.is_finite()) {
            return Err(FinanceError::invalid(
                "balance",
                "projected balance exceeds the representable range",
            ));
        }

        debug!(
            "projection complete: {} points, final balance {:.2}",
            projection.len(),
            last.balance
        );

        Ok(SavingsResult {
            final_balance: last.balance,
            total_contributions: last.cumulative_contributions,
            total_interest: last.cumulative_interest,
            projection,
        })
    }
}

/// Month numbers at which a point is emitted: each year end, plus the last
/// month when the term ends mid-year.
fn checkpoint_months(total_months: u32) -> impl Iterator<Item = (u32, u32)> {
    let full_years = total_months / MONTHS_PER_YEAR;
    let partial = total_months % MONTHS_PER_YEAR != 0;

    (1..=full_years)
        .map(|year| (year, year * MONTHS_PER_YEAR))
        .chain(partial.then_some((full_years + 1, total_months)))
}

fn project_incremental(input: &SavingsInput, rate: f64, total_months: u32) -> Vec<ProjectionPoint> {
    let mut state = SavingsState::opening(input);
    let mut projection = Vec::with_capacity(total_months.div_ceil(MONTHS_PER_YEAR) as usize);

    for (year, month_end) in checkpoint_months(total_months) {
        while state.month < month_end {
            state.advance_month(input.monthly_contribution, rate);
        }
        projection.push(state.checkpoint(year));
    }
    projection
}

fn project_restart(input: &SavingsInput, rate: f64, total_months: u32) -> Vec<ProjectionPoint> {
    checkpoint_months(total_months)
        .map(|(year, month_end)| {
            let mut state = SavingsState::opening(input);
            for _ in 0..month_end {
                state.advance_month(input.monthly_contribution, rate);
            }
            state.checkpoint(year)
        })
        .collect()
}

/// Project `input` with the default (incremental) method.
pub fn compute_projection(input: &SavingsInput) -> Result<SavingsResult, FinanceError> {
    ProjectionEngine::default().project(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reset_scenario() {
        let result = compute_projection(&SavingsInput::default()).unwrap();

        assert_eq!(result.projection.len(), 10);
        assert_eq!(result.projection[9].balance, result.final_balance);
        assert_relative_eq!(result.final_balance, 88_774.71, epsilon = 0.01);
        assert_relative_eq!(result.total_contributions, 65_000.0, epsilon = 1e-6);
        assert_relative_eq!(
            result.final_balance,
            result.total_contributions + result.total_interest,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_year_indices_ascending() {
        let result = compute_projection(&SavingsInput::default()).unwrap();
        let years: Vec<u32> = result.projection.iter().map(|p| p.year_index).collect();
        assert_eq!(years, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_restart_matches_incremental() {
        let input = SavingsInput::new(1_000_000.0, 500_000.0, 2.5, 7.0);
        let incremental = ProjectionEngine::new(ProjectionMethod::Incremental)
            .project(&input)
            .unwrap();
        let restart = ProjectionEngine::new(ProjectionMethod::Restart)
            .project(&input)
            .unwrap();
        assert_eq!(incremental, restart);
    }

    #[test]
    fn test_zero_rate_is_pure_contributions() {
        let input = SavingsInput::new(100.0, 10.0, 0.0, 2.0);
        let result = compute_projection(&input).unwrap();
        assert_eq!(result.total_interest, 0.0);
        assert_eq!(result.final_balance, 100.0 + 24.0 * 10.0);
        assert_eq!(result.projection[0].balance, 220.0);
    }

    #[test]
    fn test_partial_final_year() {
        let input = SavingsInput::new(0.0, 100.0, 0.0, 2.5);
        let result = compute_projection(&input).unwrap();
        let years: Vec<u32> = result.projection.iter().map(|p| p.year_index).collect();
        assert_eq!(years, vec![1, 2, 3]);
        assert_eq!(result.final_balance, 3000.0);
    }

    #[test]
    fn test_short_term_under_one_year() {
        let input = SavingsInput::new(1000.0, 0.0, 12.0, 0.5);
        let result = compute_projection(&input).unwrap();
        assert_eq!(result.projection.len(), 1);
        assert_eq!(result.projection[0].year_index, 1);
        assert_relative_eq!(
            result.final_balance,
            1000.0 * 1.01_f64.powi(6),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_invalid_terms_rejected() {
        let err = compute_projection(&SavingsInput::new(0.0, 0.0, 1.0, 0.0)).unwrap_err();
        assert_eq!(err.reason(), "term must be positive");
        assert!(compute_projection(&SavingsInput::new(0.0, 0.0, 1.0, 0.01)).is_err());
    }

    #[test]
    fn test_overflowing_projection_rejected() {
        let input = SavingsInput::new(1e300, 1e300, 50.0, 100.0);
        let err = compute_projection(&input).unwrap_err();
        assert_eq!(err.field(), "balance");

        let err = ProjectionEngine::new(ProjectionMethod::Restart)
            .project(&input)
            .unwrap_err();
        assert_eq!(err.field(), "balance");
    }

    #[test]
    fn test_checkpoint_months() {
        let points: Vec<_> = checkpoint_months(30).collect();
        assert_eq!(points, vec![(1, 12), (2, 24), (3, 30)]);
        let points: Vec<_> = checkpoint_months(24).collect();
        assert_eq!(points, vec![(1, 12), (2, 24)]);
    }
}
