use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;

use crate::config::ProductConfig;
use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::events::{EventStore, LoanEvent};
use crate::penalty::LateFeePolicy;
use crate::schedule::{aggregate, generate_schedule, Schedule, Totals};
use crate::store::{KeyValueStore, LoanRecord, LoanStore};
use crate::terms::LoanTerms;
use crate::types::{InstallmentStatus, LoanId};
use crate::view::DashboardView;

/// result of paying one installment
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub loan_id: LoanId,
    pub index: u32,
    pub amount_charged: Money,
    pub late_fee: Money,
    pub paid_count: u32,
    pub loan_completed: bool,
}

/// tracks the active loan: schedule projection plus recorded payments
pub struct LoanTracker<S: KeyValueStore> {
    config: ProductConfig,
    store: LoanStore<S>,
    record: LoanRecord,
    terms: LoanTerms,
    pub events: EventStore,
}

impl<S: KeyValueStore> LoanTracker<S> {
    /// start a new loan today and persist it, replacing any saved loan
    pub fn open(
        backend: S,
        config: ProductConfig,
        amount: Money,
        tenure: u32,
        time_provider: &SafeTimeProvider,
    ) -> Result<Self> {
        config.validate()?;
        config.check_application(amount, tenure)?;

        let now = time_provider.now();
        let record = LoanRecord::new(amount, tenure, now);
        let terms = record.terms(&config)?;

        let mut store = LoanStore::new(backend);
        store.save(&record)?;

        let mut events = EventStore::new();
        events.emit(LoanEvent::LoanOpened {
            loan_id: record.loan_id,
            amount,
            tenure,
            start_date: terms.start_date,
            timestamp: now,
        });

        log::info!(
            "opened loan {} for {} over {} months starting {}",
            record.loan_id,
            amount,
            tenure,
            terms.start_date
        );

        Ok(Self {
            config,
            store,
            record,
            terms,
            events,
        })
    }

    /// resume the saved loan, if there is one
    pub fn resume(backend: S, config: ProductConfig) -> Result<Option<Self>> {
        config.validate()?;
        let store = LoanStore::new(backend);

        let record = match store.load()? {
            Some(record) => record,
            None => return Ok(None),
        };
        let terms = record.terms(&config)?;

        log::info!(
            "resumed loan {} with {} of {} installments paid",
            record.loan_id,
            record.paid_emis.len(),
            record.tenure
        );

        Ok(Some(Self {
            config,
            store,
            record,
            terms,
            events: EventStore::new(),
        }))
    }

    pub fn loan_id(&self) -> LoanId {
        self.record.loan_id
    }

    pub fn config(&self) -> &ProductConfig {
        &self.config
    }

    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    pub fn record(&self) -> &LoanRecord {
        &self.record
    }

    pub fn store(&self) -> &LoanStore<S> {
        &self.store
    }

    fn today(time_provider: &SafeTimeProvider) -> NaiveDate {
        time_provider.now().date_naive()
    }

    /// schedule as seen today
    pub fn schedule(&self, time_provider: &SafeTimeProvider) -> Result<Schedule> {
        generate_schedule(&self.terms, Self::today(time_provider), &self.record.paid_set())
    }

    pub fn totals(&self, time_provider: &SafeTimeProvider) -> Result<Totals> {
        Ok(aggregate(&self.schedule(time_provider)?))
    }

    pub fn view(&self, time_provider: &SafeTimeProvider) -> Result<DashboardView> {
        let schedule = self.schedule(time_provider)?;
        let totals = aggregate(&schedule);
        DashboardView::build(&self.terms, &schedule, &totals)
    }

    /// record payment of installment `index`
    pub fn pay_installment(
        &mut self,
        index: u32,
        time_provider: &SafeTimeProvider,
    ) -> Result<PaymentReceipt> {
        let schedule = self.schedule(time_provider)?;
        let installment = *schedule.installment(index).ok_or(LoanError::InstallmentNotFound {
            index,
            tenure: self.terms.tenure,
        })?;

        if installment.status == InstallmentStatus::Paid {
            return Err(LoanError::AlreadyPaid { index });
        }

        let late_fees = LateFeePolicy::new(self.terms.late_fee);
        let late_fee = late_fees.fee_for(installment.status);
        let amount_charged = late_fees.amount_payable(&installment)?;

        // only adopt the payment once it is persisted
        let mut record = self.record.clone();
        record.mark_paid(index);
        self.store.save(&record)?;
        self.record = record;

        let now = time_provider.now();
        self.events.emit(LoanEvent::InstallmentPaid {
            loan_id: self.record.loan_id,
            index,
            amount: amount_charged,
            late_fee,
            timestamp: now,
        });

        let totals = aggregate(&self.schedule(time_provider)?);
        let loan_completed = totals.is_settled();
        if loan_completed {
            let principal_and_interest_paid = Money::from_f64_rounded(totals.amount_paid)?;
            self.events.emit(LoanEvent::LoanCompleted {
                loan_id: self.record.loan_id,
                principal_and_interest_paid,
                timestamp: now,
            });
            log::info!("loan {} fully repaid", self.record.loan_id);
        }

        log::info!(
            "installment #{} of loan {} paid: {} (late fee {})",
            index,
            self.record.loan_id,
            amount_charged,
            late_fee
        );

        Ok(PaymentReceipt {
            loan_id: self.record.loan_id,
            index,
            amount_charged,
            late_fee,
            paid_count: totals.paid_count,
            loan_completed,
        })
    }

    /// pay the first pending or overdue installment
    pub fn pay_next_due(&mut self, time_provider: &SafeTimeProvider) -> Result<PaymentReceipt> {
        let next = self
            .schedule(time_provider)?
            .next_due()
            .map(|i| i.index)
            .ok_or(LoanError::NothingDue)?;
        self.pay_installment(next, time_provider)
    }

    pub fn into_backend(self) -> S {
        self.store.into_backend()
    }
}
