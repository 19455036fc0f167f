use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::types::RateConvention;

/// amounts and tenures an applicant can pick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationLimits {
    pub min_amount: Money,
    pub max_amount: Money,
    pub amount_step: Money,
    pub min_tenure: u32,
    pub max_tenure: u32,
    pub tenure_step: u32,
}

impl ApplicationLimits {
    /// calculator sliders: Rs 5,000 to 2,00,000 in 5,000s, 3 to 36 months in 3s
    pub fn calculator() -> Self {
        Self {
            min_amount: Money::from_major(5_000),
            max_amount: Money::from_major(200_000),
            amount_step: Money::from_major(5_000),
            min_tenure: 3,
            max_tenure: 36,
            tenure_step: 3,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_amount.is_negative()
            || self.min_amount > self.max_amount
            || !self.amount_step.as_decimal().is_sign_positive()
            || self.amount_step.as_decimal().is_zero()
        {
            return Err(LoanError::InvalidConfiguration {
                message: format!(
                    "amount range {}..{} step {} is invalid",
                    self.min_amount, self.max_amount, self.amount_step
                ),
            });
        }
        if self.min_tenure == 0 || self.min_tenure > self.max_tenure || self.tenure_step == 0 {
            return Err(LoanError::InvalidConfiguration {
                message: format!(
                    "tenure range {}..{} step {} is invalid",
                    self.min_tenure, self.max_tenure, self.tenure_step
                ),
            });
        }
        Ok(())
    }

    pub fn check(&self, amount: Money, tenure: u32) -> Result<()> {
        let offset = (amount - self.min_amount).as_decimal();
        if amount < self.min_amount
            || amount > self.max_amount
            || !(offset % self.amount_step.as_decimal()).is_zero()
        {
            return Err(LoanError::InvalidConfiguration {
                message: format!(
                    "amount {} not offered ({}..{} in steps of {})",
                    amount, self.min_amount, self.max_amount, self.amount_step
                ),
            });
        }
        if tenure < self.min_tenure
            || tenure > self.max_tenure
            || (tenure - self.min_tenure) % self.tenure_step != 0
        {
            return Err(LoanError::InvalidConfiguration {
                message: format!("tenure of {} months is not offered", tenure),
            });
        }
        Ok(())
    }
}

/// product configuration shared by every loan of one product variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub rate: Rate,
    pub rate_convention: RateConvention,
    /// fixed surcharge on an overdue installment
    pub late_fee: Money,
    /// pin every due date to this day of month
    pub pin_day_of_month: Option<u32>,
    pub default_amount: Money,
    pub default_tenure: u32,
    /// None accepts any positive amount and tenure
    pub limits: Option<ApplicationLimits>,
}

impl ProductConfig {
    /// dashboard and apply flow: 16% charged per month, Rs 300 late fee
    pub fn dashboard() -> Self {
        Self {
            rate: Rate::from_percentage(16),
            rate_convention: RateConvention::PerPeriod,
            late_fee: Money::from_major(300),
            pin_day_of_month: None,
            default_amount: Money::from_major(15_000),
            default_tenure: 12,
            limits: None,
        }
    }

    /// landing page calculator: 16% a year, applied monthly
    pub fn landing_calculator() -> Self {
        Self {
            rate: Rate::from_percentage(16),
            rate_convention: RateConvention::AnnualOverTwelve,
            late_fee: Money::from_major(300),
            pin_day_of_month: None,
            default_amount: Money::from_major(50_000),
            default_tenure: 12,
            limits: Some(ApplicationLimits::calculator()),
        }
    }

    /// same product with every installment due on a fixed day
    pub fn with_pinned_due_day(mut self, day: u32) -> Self {
        self.pin_day_of_month = Some(day);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ProductConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rate.is_negative() {
            return Err(LoanError::InvalidInterestRate { rate: self.rate });
        }
        if self.late_fee.is_negative() {
            return Err(LoanError::InvalidConfiguration {
                message: format!("late fee cannot be negative: {}", self.late_fee),
            });
        }
        if let Some(day) = self.pin_day_of_month {
            if !(1..=31).contains(&day) {
                return Err(LoanError::InvalidDayOfMonth { day });
            }
        }
        if let Some(limits) = &self.limits {
            limits.validate()?;
        }
        Ok(())
    }

    /// check an application against the product limits
    pub fn check_application(&self, amount: Money, tenure: u32) -> Result<()> {
        match &self.limits {
            Some(limits) => limits.check(amount, tenure),
            None => Ok(()),
        }
    }
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self::dashboard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(ProductConfig::dashboard().validate().is_ok());
        assert!(ProductConfig::landing_calculator().validate().is_ok());
        assert!(ProductConfig::dashboard().with_pinned_due_day(18).validate().is_ok());
    }

    #[test]
    fn test_presets_use_distinct_conventions() {
        let dashboard = ProductConfig::dashboard();
        let landing = ProductConfig::landing_calculator();

        assert_eq!(dashboard.rate, landing.rate);
        assert_ne!(dashboard.rate_convention, landing.rate_convention);
    }

    #[test]
    fn test_invalid_pin_day() {
        let config = ProductConfig::dashboard().with_pinned_due_day(32);
        assert!(matches!(
            config.validate(),
            Err(LoanError::InvalidDayOfMonth { day: 32 })
        ));
    }

    #[test]
    fn test_calculator_limits() {
        let config = ProductConfig::landing_calculator();

        for tenure in (3..=36).step_by(3) {
            assert!(config.check_application(Money::from_major(50_000), tenure).is_ok());
        }
        assert!(config.check_application(Money::from_major(5_000), 12).is_ok());
        assert!(config.check_application(Money::from_major(200_000), 36).is_ok());

        assert!(config.check_application(Money::from_major(50_000), 7).is_err());
        assert!(config.check_application(Money::from_major(50_000), 39).is_err());
        assert!(config.check_application(Money::from_major(50_000), 0).is_err());
        assert!(config.check_application(Money::from_major(300_000), 12).is_err());
        assert!(config.check_application(Money::from_major(1_000), 12).is_err());
        assert!(config.check_application(Money::from_major(12_345), 12).is_err());
    }

    #[test]
    fn test_dashboard_accepts_any_application() {
        let config = ProductConfig::dashboard();

        assert!(config.check_application(Money::from_major(15_000), 12).is_ok());
        assert!(config.check_application(Money::from_major(300_000), 7).is_ok());
    }

    #[test]
    fn test_invalid_limits() {
        let mut config = ProductConfig::landing_calculator();
        if let Some(limits) = config.limits.as_mut() {
            limits.tenure_step = 0;
        }
        assert!(config.validate().is_err());

        let mut config = ProductConfig::landing_calculator();
        if let Some(limits) = config.limits.as_mut() {
            limits.amount_step = Money::ZERO;
        }
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_convention() {
        let config = ProductConfig::landing_calculator().with_pinned_due_day(18);
        let json = serde_json::to_string(&config).unwrap();
        let parsed = ProductConfig::from_json_str(&json).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_json_rejects_negative_fee() {
        let mut config = ProductConfig::dashboard();
        config.late_fee = Money::from_major(-1);
        let json = serde_json::to_string(&config).unwrap();

        assert!(ProductConfig::from_json_str(&json).is_err());
    }
}
