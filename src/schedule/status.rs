use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::types::InstallmentStatus;

/// classify one installment against `today` and the paid set
///
/// Payment dominates the date comparison: a paid installment is never
/// overdue. Dates carry no time of day, so an installment due today is
/// still pending.
pub fn classify(
    index: u32,
    due_date: NaiveDate,
    today: NaiveDate,
    paid: &BTreeSet<u32>,
) -> InstallmentStatus {
    if paid.contains(&index) {
        InstallmentStatus::Paid
    } else if due_date < today {
        InstallmentStatus::Overdue
    } else {
        InstallmentStatus::Pending
    }
}
