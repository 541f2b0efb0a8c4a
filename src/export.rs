//! CSV export of amortization schedules and savings projections
//!
//! Column names follow the chart data keys (`month`, `principal`, `interest`,
//! `balance` / `year`, `contributions`, `interest`, `total`). Amounts are
//! rounded to cents.

use crate::loan::LoanResult;
use crate::savings::SavingsResult;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct ScheduleRow {
    month: u32,
    principal: f64,
    interest: f64,
    balance: f64,
}

#[derive(Serialize)]
struct ProjectionRow {
    year: u32,
    contributions: f64,
    interest: f64,
    total: f64,
}

fn cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Write the emitted schedule rows of `result` to `writer`
pub fn write_schedule_csv<W: Write>(writer: W, result: &LoanResult) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for period in &result.schedule {
        csv.serialize(ScheduleRow {
            month: period.period_index,
            principal: cents(period.principal_paid),
            interest: cents(period.interest_paid),
            balance: cents(period.remaining_balance),
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the yearly projection points of `result` to `writer`
pub fn write_projection_csv<W: Write>(writer: W, result: &SavingsResult) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for point in &result.projection {
        csv.serialize(ProjectionRow {
            year: point.year_index,
            contributions: cents(point.cumulative_contributions),
            interest: cents(point.cumulative_interest),
            total: cents(point.balance),
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Write a schedule to a file at `path`
pub fn export_schedule(path: &Path, result: &LoanResult) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_schedule_csv(file, result)?;
    log::info!("wrote {} schedule rows to {}", result.schedule.len(), path.display());
    Ok(())
}

/// Write a projection to a file at `path`
pub fn export_projection(path: &Path, result: &SavingsResult) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_projection_csv(file, result)?;
    log::info!("wrote {} projection rows to {}", result.projection.len(), path.display());
    Ok(())
}
