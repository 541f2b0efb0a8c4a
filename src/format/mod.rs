//! Locale-aware formatting of currency amounts, numbers, percents and dates

mod locale;
mod number;
mod date;

pub use locale::{Locale, NumberFormat, SymbolPosition, UnknownLocale};
pub use number::{format_currency, format_number, format_percent};
pub use date::{format_date, payment_date};
