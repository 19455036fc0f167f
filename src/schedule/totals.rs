use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::schedule::{Installment, Schedule};
use crate::types::InstallmentStatus;

/// derived totals of a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_interest: f64,
    pub total_repayment: f64,
    pub paid_count: u32,
    pub overdue_count: u32,
    pub amount_paid: f64,
    pub outstanding: f64,
    pub progress_percent: f64,
    pub penalties_due: Money,
    pub next_due: Option<Installment>,
}

/// reduce a schedule to its totals without recomputing balances
pub fn aggregate(schedule: &Schedule) -> Totals {
    let mut total_interest = 0.0;
    let mut total_repayment = 0.0;
    let mut paid_count = 0u32;
    let mut overdue_count = 0u32;
    let mut penalties_due = Money::ZERO;

    for installment in &schedule.installments {
        total_interest += installment.interest_component;
        total_repayment += installment.amount;
        match installment.status {
            InstallmentStatus::Paid => paid_count += 1,
            InstallmentStatus::Overdue => {
                overdue_count += 1;
                penalties_due += installment.penalty;
            }
            InstallmentStatus::Pending => {}
        }
    }

    let amount_paid = f64::from(paid_count) * schedule.emi;
    let progress_percent = if schedule.tenure == 0 {
        0.0
    } else {
        f64::from(paid_count) / f64::from(schedule.tenure) * 100.0
    };

    Totals {
        total_interest,
        total_repayment,
        paid_count,
        overdue_count,
        amount_paid,
        outstanding: total_repayment - amount_paid,
        progress_percent,
        penalties_due,
        next_due: schedule.next_due().copied(),
    }
}

impl Totals {
    pub fn is_settled(&self) -> bool {
        self.next_due.is_none()
    }
}
