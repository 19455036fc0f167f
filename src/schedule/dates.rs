use chrono::{Datelike, Months, NaiveDate};

use crate::errors::{LoanError, Result};

/// due date of installment `index`: `start` advanced by `index` calendar months
///
/// Month addition clamps to the last day of shorter months (Jan 31 + 1 month
/// is Feb 28/29). With `pin_day_of_month` set, the day is replaced by the
/// pinned day, clamped the same way.
pub fn due_date(start: NaiveDate, index: u32, pin_day_of_month: Option<u32>) -> Result<NaiveDate> {
    let shifted = start
        .checked_add_months(Months::new(index))
        .ok_or_else(|| LoanError::InvalidDate {
            message: format!("{} + {} months is out of range", start, index),
        })?;

    match pin_day_of_month {
        None => Ok(shifted),
        Some(day) => pin_day(shifted, day),
    }
}

fn pin_day(date: NaiveDate, day: u32) -> Result<NaiveDate> {
    if !(1..=31).contains(&day) {
        return Err(LoanError::InvalidDayOfMonth { day });
    }
    let day = day.min(days_in_month(date.year(), date.month())?);
    date.with_day(day).ok_or_else(|| LoanError::InvalidDate {
        message: format!("cannot pin {} to day {}", date, day),
    })
}

fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = first.and_then(|d| d.checked_add_months(Months::new(1)));
    match (first, next) {
        (Some(first), Some(next)) => Ok((next - first).num_days() as u32),
        _ => Err(LoanError::InvalidDate {
            message: format!("no calendar month {}-{}", year, month),
        }),
    }
}
