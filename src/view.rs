/// serializable dashboard projection, rounded to whole currency units
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::penalty::LateFeePolicy;
use crate::schedule::{Installment, Schedule, Totals};
use crate::terms::LoanTerms;
use crate::types::{InstallmentStatus, RateConvention};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoanHealth {
    Active,
    Overdue,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub principal: Money,
    pub rate: Rate,
    pub rate_convention: RateConvention,
    pub tenure: u32,
    pub emi: Money,
    pub total_interest: Money,
    pub total_repayment: Money,
    pub amount_paid: Money,
    pub remaining: Money,
    pub paid_count: u32,
    pub overdue_count: u32,
    pub progress_percent: f64,
    pub health: LoanHealth,
    pub next_due: Option<NextDueView>,
    pub rows: Vec<InstallmentRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextDueView {
    pub index: u32,
    pub due_date: NaiveDate,
    pub status: InstallmentStatus,
    pub principal: Money,
    pub interest: Money,
    pub late_fee: Money,
    pub amount_payable: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentRow {
    pub index: u32,
    pub due_date: NaiveDate,
    pub principal: Money,
    pub interest: Money,
    pub amount: Money,
    pub status: InstallmentStatus,
    pub penalty: Money,
}

impl InstallmentRow {
    fn from_installment(installment: &Installment) -> Result<Self> {
        Ok(Self {
            index: installment.index,
            due_date: installment.due_date,
            principal: Money::from_f64_rounded(installment.principal_component)?,
            interest: Money::from_f64_rounded(installment.interest_component)?,
            amount: Money::from_f64_rounded(installment.amount)?,
            status: installment.status,
            penalty: installment.penalty,
        })
    }
}

impl DashboardView {
    pub fn build(terms: &LoanTerms, schedule: &Schedule, totals: &Totals) -> Result<Self> {
        let late_fees = LateFeePolicy::new(terms.late_fee);

        let next_due = match &totals.next_due {
            Some(next) => Some(NextDueView {
                index: next.index,
                due_date: next.due_date,
                status: next.status,
                principal: Money::from_f64_rounded(next.principal_component)?,
                interest: Money::from_f64_rounded(next.interest_component)?,
                late_fee: next.penalty,
                amount_payable: late_fees.amount_payable(next)?,
            }),
            None => None,
        };

        let health = if totals.is_settled() {
            LoanHealth::Completed
        } else if totals.overdue_count > 0 {
            LoanHealth::Overdue
        } else {
            LoanHealth::Active
        };

        let rows = schedule
            .installments
            .iter()
            .map(InstallmentRow::from_installment)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            principal: terms.principal,
            rate: terms.rate,
            rate_convention: terms.rate_convention,
            tenure: terms.tenure,
            emi: Money::from_f64_rounded(schedule.emi)?,
            total_interest: Money::from_f64_rounded(totals.total_interest)?,
            total_repayment: Money::from_f64_rounded(totals.total_repayment)?,
            amount_paid: Money::from_f64_rounded(totals.amount_paid)?,
            remaining: Money::from_f64_rounded(totals.outstanding)?,
            paid_count: totals.paid_count,
            overdue_count: totals.overdue_count,
            progress_percent: totals.progress_percent,
            health,
            next_due,
            rows,
        })
    }

    /// rows still to be paid, in order
    pub fn upcoming(&self, limit: usize) -> impl Iterator<Item = &InstallmentRow> {
        self.rows
            .iter()
            .filter(|r| r.status != InstallmentStatus::Paid)
            .take(limit)
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
