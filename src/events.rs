use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::LoanId;

/// events emitted while tracking a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoanEvent {
    LoanOpened {
        loan_id: LoanId,
        amount: Money,
        tenure: u32,
        start_date: NaiveDate,
        timestamp: DateTime<Utc>,
    },
    InstallmentPaid {
        loan_id: LoanId,
        index: u32,
        amount: Money,
        late_fee: Money,
        timestamp: DateTime<Utc>,
    },
    LoanCompleted {
        loan_id: LoanId,
        /// installments paid times the EMI, late fees excluded
        principal_and_interest_paid: Money,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<LoanEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: LoanEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[LoanEvent] {
        &self.events
    }
}
