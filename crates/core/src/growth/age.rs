//! Age derivation for measurement records.

use chrono::{Datelike, NaiveDate};

use crate::error::CoreError;

/// Completed calendar months between `birth_date` and `on_date`.
///
/// A month is complete once the day-of-month of the birth date is reached,
/// so a child born on the 31st turns one month old on the 31st of the next
/// month that has one (or the 1st of the month after that).
pub fn age_in_months(birth_date: NaiveDate, on_date: NaiveDate) -> Result<i32, CoreError> {
    if on_date < birth_date {
        return Err(CoreError::Validation(format!(
            "date {on_date} is before birth date {birth_date}"
        )));
    }

    let mut months = (on_date.year() - birth_date.year()) * 12 + on_date.month() as i32
        - birth_date.month() as i32;
    if on_date.day() < birth_date.day() {
        months -= 1;
    }
    Ok(months)
}
