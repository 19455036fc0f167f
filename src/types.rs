use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::Rate;
use crate::errors::Result;

/// unique identifier for a tracked loan
pub type LoanId = Uuid;

/// lifecycle state of a single installment relative to a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstallmentStatus {
    /// due today or later, not yet paid
    Pending,
    /// recorded as paid, never reclassified
    Paid,
    /// due date strictly before today and not paid
    Overdue,
}

impl InstallmentStatus {
    /// pending or overdue
    pub fn is_outstanding(&self) -> bool {
        !matches!(self, InstallmentStatus::Paid)
    }
}

impl fmt::Display for InstallmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InstallmentStatus::Pending => "Pending",
            InstallmentStatus::Paid => "Paid",
            InstallmentStatus::Overdue => "Overdue",
        };
        f.write_str(label)
    }
}

/// how a quoted rate maps to the per-period (monthly) rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateConvention {
    /// quoted rate is already the monthly rate
    PerPeriod,
    /// quoted rate is annual, divided by 12
    AnnualOverTwelve,
}

impl RateConvention {
    /// periodic rate in double precision
    pub fn periodic_rate(&self, rate: Rate) -> Result<f64> {
        let quoted = rate.to_f64()?;
        Ok(match self {
            RateConvention::PerPeriod => quoted,
            RateConvention::AnnualOverTwelve => quoted / 12.0,
        })
    }
}
