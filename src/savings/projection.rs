//! Savings projection output structures

use serde::{Deserialize, Serialize};

/// Balance at the end of one projection year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    /// 1-based year. A term ending mid-year is not truncated to whole years:
    /// its trailing partial year gets one more point with the next index
    /// (2.5 years yields years 1, 2 and 3, the last at month 30).
    pub year_index: u32,

    /// Initial deposit plus every contribution so far
    pub cumulative_contributions: f64,

    /// Interest earned so far
    pub cumulative_interest: f64,

    pub balance: f64,
}

/// Complete savings projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsResult {
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub projection: Vec<ProjectionPoint>,
}

impl SavingsResult {
    /// Share of the final balance that came from interest (0.0 - 1.0)
    pub fn interest_share(&self) -> f64 {
        if self.final_balance <= 0.0 {
            0.0
        } else {
            self.total_interest / self.final_balance
        }
    }

    /// Projection point for a given year
    pub fn year(&self, year_index: u32) -> Option<&ProjectionPoint> {
        self.projection.iter().find(|p| p.year_index == year_index)
    }
}
