//! Number, currency and percent formatting

use super::locale::{NumberFormat, SymbolPosition};
use crate::error::{require_finite, FinanceError};

/// Format `value` with a fixed number of decimals and locale separators.
///
/// ```
/// use credicalc::format::{format_number, Locale};
///
/// let fmt = Locale::EnUs.number_format();
/// assert_eq!(format_number(1234567.891, 2, &fmt).unwrap(), "1,234,567.89");
/// ```
pub fn format_number(value: f64, decimals: usize, fmt: &NumberFormat) -> Result<String, FinanceError> {
    let (negative, body) = fixed_body(value, decimals, fmt)?;
    Ok(if negative { format!("-{}", body) } else { body })
}

/// Format a monetary amount, e.g. `$1,266.71` or `1.266,71 €`.
///
/// Negative amounts carry a leading minus (`-$50.00`).
pub fn format_currency(value: f64, fmt: &NumberFormat) -> Result<String, FinanceError> {
    let (negative, body) = fixed_body(value, fmt.currency_decimals, fmt)?;
    let sign = if negative { "-" } else { "" };
    Ok(match fmt.symbol_position {
        SymbolPosition::Prefix => format!("{}{}{}", sign, fmt.currency_symbol, body),
        SymbolPosition::Suffix => format!("{}{}\u{a0}{}", sign, body, fmt.currency_symbol),
    })
}

/// Format a value already expressed in percent, e.g. `4.2` -> `4.2%`.
pub fn format_percent(value_percent: f64, decimals: usize, fmt: &NumberFormat) -> Result<String, FinanceError> {
    Ok(format!("{}%", format_number(value_percent, decimals, fmt)?))
}

/// Sign and unsigned digits of `value`. A value that rounds to zero is
/// never negative.
fn fixed_body(value: f64, decimals: usize, fmt: &NumberFormat) -> Result<(bool, String), FinanceError> {
    let value = require_finite("value", value)?;
    let digits = format!("{:.*}", decimals, value.abs());
    let negative = value < 0.0 && digits.bytes().any(|b| matches!(b, b'1'..=b'9'));

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut body = group_digits(int_part, fmt.grouping_separator);
    if let Some(frac) = frac_part {
        body.push(fmt.decimal_separator);
        body.push_str(frac);
    }
    Ok((negative, body))
}

fn group_digits(int_part: &str, separator: Option<char>) -> String {
    let Some(sep) = separator else {
        return int_part.to_string();
    };

    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Locale;

    #[test]
    fn test_us_currency() {
        let fmt = Locale::EnUs.number_format();
        assert_eq!(format_currency(1266.7132745, &fmt).unwrap(), "$1,266.71");
        assert_eq!(format_currency(293_000.0, &fmt).unwrap(), "$293,000.00");
        assert_eq!(format_currency(0.0, &fmt).unwrap(), "$0.00");
        assert_eq!(format_currency(999.999, &fmt).unwrap(), "$1,000.00");
        assert_eq!(format_currency(-1850.0, &fmt).unwrap(), "-$1,850.00");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        let fmt = Locale::EnUs.number_format();
        assert_eq!(format_currency(-0.001, &fmt).unwrap(), "$0.00");
        assert_eq!(format_number(-0.0, 0, &fmt).unwrap(), "0");
    }

    #[test]
    fn test_european_currency() {
        let de = Locale::DeDe.number_format();
        assert_eq!(
            format_currency(1234567.5, &de).unwrap(),
            "1.234.567,50\u{a0}€"
        );

        let fr = Locale::FrFr.number_format();
        assert_eq!(
            format_currency(1234.5, &fr).unwrap(),
            "1\u{202f}234,50\u{a0}€"
        );
    }

    #[test]
    fn test_yen_has_no_decimals() {
        let fmt = Locale::JaJp.number_format();
        assert_eq!(format_currency(1234.6, &fmt).unwrap(), "¥1,235");
    }

    #[test]
    fn test_gb_currency() {
        let fmt = Locale::EnGb.number_format();
        assert_eq!(format_currency(12_600.0, &fmt).unwrap(), "£12,600.00");
    }

    #[test]
    fn test_number_grouping() {
        let fmt = Locale::EnUs.number_format();
        assert_eq!(format_number(1.0, 0, &fmt).unwrap(), "1");
        assert_eq!(format_number(123.0, 0, &fmt).unwrap(), "123");
        assert_eq!(format_number(1234.0, 0, &fmt).unwrap(), "1,234");
        assert_eq!(format_number(123456.0, 0, &fmt).unwrap(), "123,456");
        assert_eq!(format_number(-8_900_000.0, 0, &fmt).unwrap(), "-8,900,000");

        let ungrouped = NumberFormat {
            grouping_separator: None,
            ..fmt
        };
        assert_eq!(format_number(1234.5, 1, &ungrouped).unwrap(), "1234.5");
    }

    #[test]
    fn test_percent() {
        let fmt = Locale::EnUs.number_format();
        assert_eq!(format_percent(4.2, 1, &fmt).unwrap(), "4.2%");
        assert_eq!(format_percent(18.0, 0, &fmt).unwrap(), "18%");

        let de = Locale::DeDe.number_format();
        assert_eq!(format_percent(5.5, 1, &de).unwrap(), "5,5%");
    }

    #[test]
    fn test_non_finite_rejected() {
        let fmt = Locale::EnUs.number_format();
        assert!(format_currency(f64::NAN, &fmt).is_err());
        assert!(format_number(f64::INFINITY, 2, &fmt).is_err());
        assert!(format_percent(f64::NEG_INFINITY, 1, &fmt).is_err());
    }
}
