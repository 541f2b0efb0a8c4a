//! Locale presets for number, currency and date formatting

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "ja-JP")]
    JaJp,
}

impl Locale {
    pub const ALL: [Locale; 5] = [
        Locale::EnUs,
        Locale::EnGb,
        Locale::DeDe,
        Locale::FrFr,
        Locale::JaJp,
    ];

    /// BCP 47 tag
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::DeDe => "de-DE",
            Locale::FrFr => "fr-FR",
            Locale::JaJp => "ja-JP",
        }
    }

    /// Formatting rules for this locale
    pub fn number_format(&self) -> NumberFormat {
        match self {
            Locale::EnUs => NumberFormat {
                currency_symbol: "$".to_string(),
                symbol_position: SymbolPosition::Prefix,
                grouping_separator: Some(','),
                decimal_separator: '.',
                currency_decimals: 2,
                date_pattern: "%m/%d/%Y".to_string(),
            },
            Locale::EnGb => NumberFormat {
                currency_symbol: "£".to_string(),
                date_pattern: "%d/%m/%Y".to_string(),
                ..Locale::EnUs.number_format()
            },
            Locale::DeDe => NumberFormat {
                currency_symbol: "€".to_string(),
                symbol_position: SymbolPosition::Suffix,
                grouping_separator: Some('.'),
                decimal_separator: ',',
                currency_decimals: 2,
                date_pattern: "%d.%m.%Y".to_string(),
            },
            Locale::FrFr => NumberFormat {
                grouping_separator: Some('\u{202f}'),
                date_pattern: "%d/%m/%Y".to_string(),
                ..Locale::DeDe.number_format()
            },
            Locale::JaJp => NumberFormat {
                currency_symbol: "¥".to_string(),
                currency_decimals: 0,
                date_pattern: "%Y/%m/%d".to_string(),
                ..Locale::EnUs.number_format()
            },
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error for an unrecognised locale tag
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unsupported locale '{0}' (expected one of en-US, en-GB, de-DE, fr-FR, ja-JP)")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    /// Accepts `en-US`, `en_us`, `EN-us` and so on
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-").to_ascii_lowercase();
        Locale::ALL
            .into_iter()
            .find(|locale| locale.tag().to_ascii_lowercase() == normalized)
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

/// Where the currency symbol goes relative to the amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SymbolPosition {
    /// `$1,234.56`
    Prefix,
    /// `1.234,56 €` (separated by a non-breaking space)
    Suffix,
}

/// Concrete formatting rules, usually obtained from a [`Locale`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberFormat {
    pub currency_symbol: String,
    pub symbol_position: SymbolPosition,
    /// `None` disables digit grouping
    pub grouping_separator: Option<char>,
    pub decimal_separator: char,
    pub currency_decimals: usize,
    /// chrono `strftime` pattern
    pub date_pattern: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Locale::default().number_format()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::EnUs);
        assert_eq!("en_gb".parse::<Locale>().unwrap(), Locale::EnGb);
        assert_eq!(" DE-de ".parse::<Locale>().unwrap(), Locale::DeDe);
        assert!("xx-YY".parse::<Locale>().is_err());
    }

    #[test]
    fn test_tag_round_trip() {
        for locale in Locale::ALL {
            assert_eq!(locale.to_string().parse::<Locale>().unwrap(), locale);
        }
    }

    #[test]
    fn test_serde_uses_tags() {
        assert_eq!(serde_json::to_string(&Locale::FrFr).unwrap(), "\"fr-FR\"");
        let locale: Locale = serde_json::from_str("\"ja-JP\"").unwrap();
        assert_eq!(locale, Locale::JaJp);
    }
}
