use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ProductConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::schedule::emi;
use crate::types::RateConvention;

/// immutable terms of one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub rate: Rate,
    pub rate_convention: RateConvention,
    pub tenure: u32,
    pub start_date: NaiveDate,
    pub pin_day_of_month: Option<u32>,
    pub late_fee: Money,
}

impl LoanTerms {
    pub fn builder() -> LoanTermsBuilder {
        LoanTermsBuilder::new()
    }

    /// rate applied to the balance each period
    pub fn periodic_rate(&self) -> Result<f64> {
        self.rate_convention.periodic_rate(self.rate)
    }

    /// fixed installment (EMI), unrounded
    pub fn installment_amount(&self) -> Result<f64> {
        emi::installment_amount(self.principal.to_f64()?, self.periodic_rate()?, self.tenure)
    }
}

/// builder for loan terms
pub struct LoanTermsBuilder {
    principal: Option<Money>,
    rate: Rate,
    rate_convention: RateConvention,
    tenure: Option<u32>,
    start_date: Option<NaiveDate>,
    pin_day_of_month: Option<u32>,
    late_fee: Money,
}

impl LoanTermsBuilder {
    pub fn new() -> Self {
        let config = ProductConfig::default();
        Self {
            principal: None,
            rate: config.rate,
            rate_convention: config.rate_convention,
            tenure: None,
            start_date: None,
            pin_day_of_month: config.pin_day_of_month,
            late_fee: config.late_fee,
        }
    }

    /// take rate, convention, pinning and late fee from a product
    pub fn from_config(config: &ProductConfig) -> Self {
        Self::new()
            .rate(config.rate)
            .rate_convention(config.rate_convention)
            .late_fee(config.late_fee)
            .pin_day_of_month(config.pin_day_of_month)
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.principal = Some(amount);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = rate;
        self
    }

    pub fn rate_convention(mut self, convention: RateConvention) -> Self {
        self.rate_convention = convention;
        self
    }

    pub fn tenure(mut self, months: u32) -> Self {
        self.tenure = Some(months);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn pin_day_of_month(mut self, day: Option<u32>) -> Self {
        self.pin_day_of_month = day;
        self
    }

    pub fn late_fee(mut self, fee: Money) -> Self {
        self.late_fee = fee;
        self
    }

    pub fn build(self) -> Result<LoanTerms> {
        let principal = self.principal.ok_or(LoanError::InvalidConfiguration {
            message: "Loan amount is required".to_string(),
        })?;
        let tenure = self.tenure.ok_or(LoanError::InvalidConfiguration {
            message: "Tenure is required".to_string(),
        })?;
        let start_date = self.start_date.ok_or(LoanError::InvalidConfiguration {
            message: "Start date is required".to_string(),
        })?;

        if tenure == 0 {
            return Err(LoanError::InvalidTenure { tenure });
        }
        if principal.is_negative() {
            return Err(LoanError::InvalidPrincipal { principal });
        }
        if self.rate.is_negative() {
            return Err(LoanError::InvalidInterestRate { rate: self.rate });
        }
        if let Some(day) = self.pin_day_of_month {
            if !(1..=31).contains(&day) {
                return Err(LoanError::InvalidDayOfMonth { day });
            }
        }
        if self.late_fee.is_negative() {
            return Err(LoanError::InvalidConfiguration {
                message: format!("late fee cannot be negative: {}", self.late_fee),
            });
        }

        Ok(LoanTerms {
            principal,
            rate: self.rate,
            rate_convention: self.rate_convention,
            tenure,
            start_date,
            pin_day_of_month: self.pin_day_of_month,
            late_fee: self.late_fee,
        })
    }
}

impl Default for LoanTermsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
