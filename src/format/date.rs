//! Date formatting and payment calendars

use super::locale::NumberFormat;
use chrono::{Months, NaiveDate};

/// Format a date with the locale's numeric pattern, e.g. `10/16/2026`.
pub fn format_date(date: NaiveDate, fmt: &NumberFormat) -> String {
    date.format(&fmt.date_pattern).to_string()
}

/// Date of the `period_index`th monthly payment when the first payment is
/// due on `first_payment`.
///
/// Month-end dates clamp to the last day of shorter months (Jan 31 -> Feb 28).
/// Returns `None` if the date falls outside chrono's range.
pub fn payment_date(first_payment: NaiveDate, period_index: u32) -> Option<NaiveDate> {
    let offset = period_index.checked_sub(1)?;
    first_payment.checked_add_months(Months::new(offset))
}
