use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid tenure: {tenure} (must be at least one period)")]
    InvalidTenure {
        tenure: u32,
    },

    #[error("invalid principal: {principal}")]
    InvalidPrincipal {
        principal: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid day of month: {day}")]
    InvalidDayOfMonth {
        day: u32,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("installment not found: #{index} (tenure is {tenure})")]
    InstallmentNotFound {
        index: u32,
        tenure: u32,
    },

    #[error("installment #{index} already paid")]
    AlreadyPaid {
        index: u32,
    },

    #[error("no installment due, loan fully paid")]
    NothingDue,

    #[error("storage error: {message}")]
    Storage {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LoanError>;
