//! JSON request/response contract for exposing the engines as a service
//!
//! A request body is either one request object or an array of them:
//!
//! ```json
//! { "type": "loan", "principal": "250000", "annualRatePercent": 4.5, "termYears": 30, "pageSize": 60 }
//! { "type": "savings", "initialDeposit": 5000, "monthlyContribution": 500, "annualRatePercent": 5.5, "termYears": 10 }
//! ```
//!
//! Numeric fields accept JSON numbers or decimal strings. Schedules are
//! returned at full monthly resolution unless `samplingStride` is given, and
//! are paginated with `page` (0-based) and `pageSize`.

use crate::config::{CalculatorConfig, MAX_PAGE_SIZE};
use crate::error::FinanceError;
use crate::format::{format_currency, Locale};
use crate::loan::{AmortizationPeriod, LoanInput, LoanResult, ScheduleSampling};
use crate::savings::{ProjectionPoint, SavingsInput, SavingsResult};
use crate::scenario::ScenarioRunner;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Finance(#[from] FinanceError),
}

/// Accepts `1234.5` or `"1234.5"` for an `f64` field
mod number_or_string {
    use serde::de::{self, Deserializer};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(value),
            Raw::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| de::Error::custom(format!("invalid number: \"{}\"", text))),
        }
    }
}

/// Window of result rows to return
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(default)]
    pub page: usize,
    /// Defaults to the configured page size; capped at [`MAX_PAGE_SIZE`]
    #[serde(default)]
    pub page_size: Option<usize>,
}

/// Pagination metadata attached to every response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub has_more: bool,
}

impl PageRequest {
    /// Cut `rows` down to the requested page
    pub fn apply<T: Clone>(&self, rows: &[T], default_size: usize) -> (Vec<T>, PageInfo) {
        let page_size = self
            .page_size
            .unwrap_or(default_size)
            .clamp(1, MAX_PAGE_SIZE);
        let start = self.page.saturating_mul(page_size).min(rows.len());
        let end = start.saturating_add(page_size).min(rows.len());

        let info = PageInfo {
            page: self.page,
            page_size,
            total_rows: rows.len(),
            has_more: end < rows.len(),
        };
        (rows[start..end].to_vec(), info)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    #[serde(deserialize_with = "number_or_string::deserialize")]
    pub principal: f64,
    #[serde(deserialize_with = "number_or_string::deserialize")]
    pub annual_rate_percent: f64,
    #[serde(deserialize_with = "number_or_string::deserialize")]
    pub term_years: f64,
    #[serde(default)]
    pub sampling_stride: Option<u32>,
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub page_size: Option<usize>,
    /// When set, the response carries display strings for the summary cards
    #[serde(default)]
    pub locale: Option<Locale>,
}

impl LoanRequest {
    pub fn input(&self) -> LoanInput {
        LoanInput::new(self.principal, self.annual_rate_percent, self.term_years)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsRequest {
    #[serde(deserialize_with = "number_or_string::deserialize")]
    pub initial_deposit: f64,
    #[serde(deserialize_with = "number_or_string::deserialize")]
    pub monthly_contribution: f64,
    #[serde(deserialize_with = "number_or_string::deserialize")]
    pub annual_rate_percent: f64,
    #[serde(deserialize_with = "number_or_string::deserialize")]
    pub term_years: f64,
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub locale: Option<Locale>,
}

impl SavingsRequest {
    pub fn input(&self) -> SavingsInput {
        SavingsInput::new(
            self.initial_deposit,
            self.monthly_contribution,
            self.annual_rate_percent,
            self.term_years,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CalculationRequest {
    Loan(LoanRequest),
    Savings(SavingsRequest),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResponse {
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_paid: f64,
    pub total_periods: u32,
    pub schedule: Vec<AmortizationPeriod>,
    #[serde(flatten)]
    pub page: PageInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<BTreeMap<&'static str, String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsResponse {
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub projection: Vec<ProjectionPoint>,
    #[serde(flatten)]
    pub page: PageInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<BTreeMap<&'static str, String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CalculationResponse {
    Loan(LoanResponse),
    Savings(SavingsResponse),
}

/// Status code and JSON body for a transport layer
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceReply {
    pub status: u16,
    pub body: Value,
}

impl ServiceReply {
    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }
}

fn loan_summary(result: &LoanResult, locale: Locale) -> Result<BTreeMap<&'static str, String>, FinanceError> {
    let fmt = locale.number_format();
    Ok(BTreeMap::from([
        ("monthlyPayment", format_currency(result.monthly_payment, &fmt)?),
        ("totalInterest", format_currency(result.total_interest, &fmt)?),
        ("totalPaid", format_currency(result.total_paid, &fmt)?),
    ]))
}

fn savings_summary(result: &SavingsResult, locale: Locale) -> Result<BTreeMap<&'static str, String>, FinanceError> {
    let fmt = locale.number_format();
    Ok(BTreeMap::from([
        ("finalBalance", format_currency(result.final_balance, &fmt)?),
        ("totalContributions", format_currency(result.total_contributions, &fmt)?),
        ("totalInterest", format_currency(result.total_interest, &fmt)?),
    ]))
}

/// Run one parsed request
pub fn handle_request(
    request: &CalculationRequest,
    config: &CalculatorConfig,
) -> Result<CalculationResponse, ServiceError> {
    match request {
        CalculationRequest::Loan(req) => {
            let sampling = ScheduleSampling::from_stride(req.sampling_stride);
            let runner = ScenarioRunner::with_engines(sampling, config.projection_method);
            let result = runner.run_loan(&req.input())?;

            let pager = PageRequest {
                page: req.page,
                page_size: req.page_size,
            };
            let (schedule, page) = pager.apply(&result.schedule, config.page_size);
            let formatted = req.locale.map(|l| loan_summary(&result, l)).transpose()?;

            Ok(CalculationResponse::Loan(LoanResponse {
                monthly_payment: result.monthly_payment,
                total_interest: result.total_interest,
                total_paid: result.total_paid,
                total_periods: result.total_periods,
                schedule,
                page,
                formatted,
            }))
        }
        CalculationRequest::Savings(req) => {
            let runner = ScenarioRunner::from_config(config);
            let result = runner.run_savings(&req.input())?;

            let pager = PageRequest {
                page: req.page,
                page_size: req.page_size,
            };
            let (projection, page) = pager.apply(&result.projection, config.page_size);
            let formatted = req.locale.map(|l| savings_summary(&result, l)).transpose()?;

            Ok(CalculationResponse::Savings(SavingsResponse {
                final_balance: result.final_balance,
                total_contributions: result.total_contributions,
                total_interest: result.total_interest,
                projection,
                page,
                formatted,
            }))
        }
    }
}

/// Parse and run one request value, rendering failures as an error object
fn handle_value(value: Value, config: &CalculatorConfig) -> Result<Value, ServiceError> {
    let request: CalculationRequest = serde_json::from_value(value)?;
    let response = handle_request(&request, config)?;
    Ok(serde_json::to_value(response)?)
}

fn error_body(err: &ServiceError) -> Value {
    match err {
        ServiceError::Finance(e) => json!({ "error": e.to_string(), "field": e.field() }),
        ServiceError::Json(e) => json!({ "error": format!("malformed request: {}", e) }),
    }
}

/// Handle a raw request body: one request object or an array of them.
///
/// A single request that fails yields status 400. A batch always yields 200
/// with an error object in place of each failed element.
pub fn handle_body(body: &str, config: &CalculatorConfig) -> ServiceReply {
    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            warn!("rejected unparseable body: {}", e);
            return ServiceReply::error(400, format!("malformed request: {}", e));
        }
    };

    match parsed {
        Value::Array(items) => {
            info!("handling batch of {} requests", items.len());
            let results: Vec<Value> = items
                .into_par_iter()
                .map(|item| {
                    handle_value(item, config).unwrap_or_else(|e| {
                        warn!("batch element rejected: {}", e);
                        error_body(&e)
                    })
                })
                .collect();
            ServiceReply {
                status: 200,
                body: Value::Array(results),
            }
        }
        value => match handle_value(value, config) {
            Ok(body) => ServiceReply { status: 200, body },
            Err(e) => {
                warn!("request rejected: {}", e);
                ServiceReply {
                    status: 400,
                    body: error_body(&e),
                }
            }
        },
    }
}
