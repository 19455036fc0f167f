use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::schedule::Installment;
use crate::types::InstallmentStatus;

/// late fee policy: a fixed surcharge per overdue installment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LateFeePolicy {
    pub fixed_fee: Money,
}

impl LateFeePolicy {
    pub fn new(fixed_fee: Money) -> Self {
        Self { fixed_fee }
    }

    /// fee carried by an installment in the given state
    pub fn fee_for(&self, status: InstallmentStatus) -> Money {
        match status {
            InstallmentStatus::Overdue => self.fixed_fee,
            InstallmentStatus::Pending | InstallmentStatus::Paid => Money::ZERO,
        }
    }

    /// amount to collect for an installment: rounded EMI plus any late fee
    pub fn amount_payable(&self, installment: &Installment) -> Result<Money> {
        let emi = Money::from_f64_rounded(installment.amount)?;
        Ok(emi + self.fee_for(installment.status))
    }
}
