//! Calculator configuration
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```json
//! { "locale": "de-DE", "samplingStride": 12, "loanDefaults": { "principal": 15000, "annualRatePercent": 7.9, "termYears": 3 } }
//! ```

use crate::format::{Locale, NumberFormat};
use crate::loan::{LoanInput, ScheduleSampling};
use crate::savings::{ProjectionMethod, SavingsInput};
use crate::term::MONTHS_PER_YEAR;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file looked up by the CLI when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "credicalc.json";

/// Default number of schedule rows per service response page
pub const DEFAULT_PAGE_SIZE: usize = 120;

/// Upper bound on a requested page size
pub const MAX_PAGE_SIZE: usize = 600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Settings shared by the CLI and the service layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculatorConfig {
    /// Display locale for currency, number and date output
    pub locale: Locale,

    /// Overrides individual formatting rules of `locale`
    pub number_format: Option<NumberFormat>,

    /// Stride for the rendered amortization table (1 = every month)
    pub sampling_stride: u32,

    /// Savings checkpoint method
    pub projection_method: ProjectionMethod,

    /// Values used when a loan input is omitted (calculator reset state)
    pub loan_defaults: LoanInput,

    /// Values used when a savings input is omitted
    pub savings_defaults: SavingsInput,

    /// Rows per page at the service boundary
    pub page_size: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            locale: Locale::EnUs,
            number_format: None,
            sampling_stride: MONTHS_PER_YEAR,
            projection_method: ProjectionMethod::Incremental,
            loan_defaults: LoanInput::default(),
            savings_defaults: SavingsInput::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CalculatorConfig {
    /// Load a config file, filling omitted fields with defaults
    pub fn from_json_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise [`DEFAULT_CONFIG_PATH`] if it exists,
    /// otherwise the defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_json_path(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_json_path(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sampling_stride == 0 {
            return Err(ConfigError::Invalid("samplingStride must be at least 1".into()));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "pageSize must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }

    /// Formatting rules: the explicit override, or the locale preset
    pub fn number_format(&self) -> NumberFormat {
        self.number_format
            .clone()
            .unwrap_or_else(|| self.locale.number_format())
    }

    pub fn sampling(&self) -> ScheduleSampling {
        ScheduleSampling::from_stride(Some(self.sampling_stride))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CalculatorConfig::default();
        assert_eq!(config.locale, Locale::EnUs);
        assert_eq!(config.sampling(), ScheduleSampling::YEARLY);
        assert_eq!(config.loan_defaults, LoanInput::default());
        assert_eq!(config.number_format().currency_symbol, "$");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: CalculatorConfig =
            serde_json::from_str(r#"{"locale": "de-DE", "samplingStride": 1}"#).unwrap();
        assert_eq!(config.locale, Locale::DeDe);
        assert_eq!(config.sampling(), ScheduleSampling::Full);
        assert_eq!(config.savings_defaults, SavingsInput::default());
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.number_format().currency_symbol, "€");
    }

    #[test]
    fn test_number_format_override() {
        let mut custom = Locale::EnUs.number_format();
        custom.currency_symbol = "R$".to_string();
        let config = CalculatorConfig {
            number_format: Some(custom),
            ..Default::default()
        };
        assert_eq!(config.number_format().currency_symbol, "R$");
    }

    #[test]
    fn test_invalid_values() {
        let config = CalculatorConfig {
            sampling_stride: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CalculatorConfig {
            page_size: MAX_PAGE_SIZE + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_path() {
        let path = std::env::temp_dir().join(format!("credicalc-config-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, r#"{{"locale": "ja-JP", "pageSize": 24}}"#).unwrap();
        drop(file);

        let config = CalculatorConfig::from_json_path(&path).unwrap();
        assert_eq!(config.locale, Locale::JaJp);
        assert_eq!(config.page_size, 24);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CalculatorConfig::from_json_path(Path::new("/nonexistent/credicalc.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
