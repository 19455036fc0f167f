use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::decimal::Money;
use crate::errors::Result;
use crate::penalty::LateFeePolicy;
use crate::schedule::{dates, emi, status};
use crate::terms::LoanTerms;
use crate::types::InstallmentStatus;

/// relative tolerance for the closing balance
pub const BALANCE_TOLERANCE: f64 = 1e-6;

/// one period of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub index: u32,
    pub due_date: NaiveDate,
    pub amount: f64,
    pub principal_component: f64,
    pub interest_component: f64,
    pub status: InstallmentStatus,
    pub penalty: Money,
}

/// amortization schedule projected for a reference date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub principal: f64,
    pub periodic_rate: f64,
    pub emi: f64,
    pub tenure: u32,
    pub installments: Vec<Installment>,
    /// balance left after the last installment
    pub closing_balance: f64,
}

impl Schedule {
    /// installment by 1-based index
    pub fn installment(&self, index: u32) -> Option<&Installment> {
        index
            .checked_sub(1)
            .and_then(|i| self.installments.get(i as usize))
    }

    /// first pending or overdue installment
    pub fn next_due(&self) -> Option<&Installment> {
        self.installments.iter().find(|i| i.status.is_outstanding())
    }

    /// closing balance within tolerance of zero
    pub fn is_fully_amortized(&self) -> bool {
        self.closing_balance.abs() <= BALANCE_TOLERANCE * self.principal.max(1.0)
    }
}

/// build the schedule for `terms` as seen on `today`
///
/// Indices in `paid` outside `1..=tenure` are ignored.
pub fn generate_schedule(
    terms: &LoanTerms,
    today: NaiveDate,
    paid: &BTreeSet<u32>,
) -> Result<Schedule> {
    let principal = terms.principal.to_f64()?;
    let periodic_rate = terms.periodic_rate()?;
    let amount = emi::installment_amount(principal, periodic_rate, terms.tenure)?;
    let late_fees = LateFeePolicy::new(terms.late_fee);

    let mut installments = Vec::with_capacity(terms.tenure as usize);
    let mut balance = principal;

    for index in 1..=terms.tenure {
        let due_date = dates::due_date(terms.start_date, index, terms.pin_day_of_month)?;
        let interest_component = balance * periodic_rate;
        let principal_component = amount - interest_component;
        balance -= principal_component;

        let status = status::classify(index, due_date, today, paid);

        installments.push(Installment {
            index,
            due_date,
            amount,
            principal_component,
            interest_component,
            status,
            penalty: late_fees.fee_for(status),
        });
    }

    let schedule = Schedule {
        principal,
        periodic_rate,
        emi: amount,
        tenure: terms.tenure,
        installments,
        closing_balance: balance,
    };

    if schedule.is_fully_amortized() {
        log::debug!(
            "generated {} installments of {:.2} at rate {} (closing balance {:e})",
            terms.tenure,
            amount,
            periodic_rate,
            balance
        );
    } else {
        log::warn!(
            "schedule for {} over {} periods closes at {} instead of zero",
            principal,
            terms.tenure,
            balance
        );
    }

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::types::RateConvention;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn terms(amount: i64, tenure: u32) -> LoanTerms {
        LoanTerms::builder()
            .amount(Money::from_major(amount))
            .tenure(tenure)
            .start_date(date(2024, 1, 15))
            .build()
            .unwrap()
    }

    #[test]
    fn test_schedule_shape() {
        let schedule = generate_schedule(&terms(15_000, 12), date(2024, 1, 15), &BTreeSet::new()).unwrap();

        assert_eq!(schedule.installments.len(), 12);
        for (i, installment) in schedule.installments.iter().enumerate() {
            assert_eq!(installment.index, i as u32 + 1);
            assert_eq!(installment.amount, schedule.emi);
            assert_relative_eq!(
                installment.principal_component + installment.interest_component,
                installment.amount,
                max_relative = 1e-12
            );
        }

        let first = &schedule.installments[0];
        assert_eq!(first.due_date, date(2024, 2, 15));
        assert_relative_eq!(first.interest_component, 2_400.0, max_relative = 1e-12);
        assert_eq!(schedule.installments[11].due_date, date(2025, 1, 15));
    }

    #[test]
    fn test_balance_reaches_zero() {
        for &(amount, convention) in &[
            (15_000, RateConvention::PerPeriod),
            (50_000, RateConvention::AnnualOverTwelve),
            (1, RateConvention::PerPeriod),
            (499_999, RateConvention::AnnualOverTwelve),
        ] {
            for &tenure in &[1, 3, 6, 12, 18, 24, 36, 60] {
                let terms = LoanTerms::builder()
                    .amount(Money::from_major(amount))
                    .rate_convention(convention)
                    .tenure(tenure)
                    .start_date(date(2024, 1, 15))
                    .build()
                    .unwrap();
                let schedule = generate_schedule(&terms, date(2024, 1, 15), &BTreeSet::new()).unwrap();

                assert!(
                    schedule.is_fully_amortized(),
                    "{} over {} closed at {}",
                    amount,
                    tenure,
                    schedule.closing_balance
                );
                let repaid: f64 = schedule.installments.iter().map(|i| i.principal_component).sum();
                assert_relative_eq!(repaid, amount as f64, max_relative = 1e-6);
            }
        }
    }

    #[test]
    fn test_tiny_rates_still_amortize() {
        for &(mantissa, scale) in &[(1i64, 17u32), (1, 12), (1, 9), (5, 7)] {
            let terms = LoanTerms::builder()
                .amount(Money::from_major(15_000))
                .rate(Rate::from_decimal(rust_decimal::Decimal::new(mantissa, scale)))
                .tenure(12)
                .start_date(date(2024, 1, 15))
                .build()
                .unwrap();
            let schedule = generate_schedule(&terms, date(2024, 1, 15), &BTreeSet::new()).unwrap();

            assert!(
                schedule.is_fully_amortized(),
                "rate {}e-{} closed at {}",
                mantissa,
                scale,
                schedule.closing_balance
            );
            assert_relative_eq!(schedule.emi, 1_250.0, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_zero_rate_schedule() {
        let terms = LoanTerms::builder()
            .amount(Money::from_major(12_000))
            .rate(Rate::ZERO)
            .tenure(12)
            .start_date(date(2024, 1, 15))
            .build()
            .unwrap();
        let schedule = generate_schedule(&terms, date(2024, 1, 15), &BTreeSet::new()).unwrap();

        assert_eq!(schedule.emi, 1_000.0);
        assert!(schedule.installments.iter().all(|i| i.interest_component == 0.0));
        assert_eq!(schedule.closing_balance, 0.0);
    }

    #[test]
    fn test_zero_principal_schedule() {
        let schedule = generate_schedule(&terms(0, 6), date(2024, 1, 15), &BTreeSet::new()).unwrap();

        assert_eq!(schedule.emi, 0.0);
        assert_eq!(schedule.installments.len(), 6);
        assert!(schedule.is_fully_amortized());
    }

    #[test]
    fn test_statuses_and_penalties() {
        let paid: BTreeSet<u32> = [1, 3].into_iter().collect();
        // installments 1..=4 fall before today
        let today = date(2024, 6, 1);
        let schedule = generate_schedule(&terms(15_000, 12), today, &paid).unwrap();

        let statuses: Vec<InstallmentStatus> = schedule.installments.iter().map(|i| i.status).collect();
        assert_eq!(statuses[0], InstallmentStatus::Paid);
        assert_eq!(statuses[1], InstallmentStatus::Overdue);
        assert_eq!(statuses[2], InstallmentStatus::Paid);
        assert_eq!(statuses[3], InstallmentStatus::Overdue);
        assert!(statuses[4..].iter().all(|s| *s == InstallmentStatus::Pending));

        for installment in &schedule.installments {
            if installment.status == InstallmentStatus::Overdue {
                assert_eq!(installment.penalty, Money::from_major(300));
            } else {
                assert_eq!(installment.penalty, Money::ZERO);
            }
        }
    }

    #[test]
    fn test_due_today_is_pending() {
        let schedule = generate_schedule(&terms(15_000, 12), date(2024, 2, 15), &BTreeSet::new()).unwrap();
        assert_eq!(schedule.installments[0].status, InstallmentStatus::Pending);

        let schedule = generate_schedule(&terms(15_000, 12), date(2024, 2, 16), &BTreeSet::new()).unwrap();
        assert_eq!(schedule.installments[0].status, InstallmentStatus::Overdue);
    }

    #[test]
    fn test_out_of_range_paid_indices_ignored() {
        let paid: BTreeSet<u32> = [0, 13, 99].into_iter().collect();
        let with_stale = generate_schedule(&terms(15_000, 12), date(2024, 1, 15), &paid).unwrap();
        let clean = generate_schedule(&terms(15_000, 12), date(2024, 1, 15), &BTreeSet::new()).unwrap();

        assert_eq!(with_stale, clean);
    }

    #[test]
    fn test_pinned_due_dates() {
        let terms = LoanTerms::builder()
            .amount(Money::from_major(15_000))
            .tenure(3)
            .start_date(date(2024, 1, 25))
            .pin_day_of_month(Some(18))
            .build()
            .unwrap();
        let schedule = generate_schedule(&terms, date(2024, 1, 25), &BTreeSet::new()).unwrap();

        let due: Vec<NaiveDate> = schedule.installments.iter().map(|i| i.due_date).collect();
        assert_eq!(due, vec![date(2024, 2, 18), date(2024, 3, 18), date(2024, 4, 18)]);
    }

    #[test]
    fn test_lookup_helpers() {
        let paid: BTreeSet<u32> = [1, 2].into_iter().collect();
        let schedule = generate_schedule(&terms(15_000, 3), date(2024, 1, 15), &paid).unwrap();

        assert!(schedule.installment(0).is_none());
        assert_eq!(schedule.installment(3).map(|i| i.index), Some(3));
        assert!(schedule.installment(4).is_none());
        assert_eq!(schedule.next_due().map(|i| i.index), Some(3));

        let all_paid: BTreeSet<u32> = [1, 2, 3].into_iter().collect();
        let schedule = generate_schedule(&terms(15_000, 3), date(2024, 1, 15), &all_paid).unwrap();
        assert!(schedule.next_due().is_none());
    }
}
