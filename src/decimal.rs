use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

use crate::errors::{LoanError, Result};

/// money type for amounts that cross a display or persistence boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d)
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> std::result::Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?))
    }

    /// create from integer amount (rupees, dollars, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// round a raw engine value to whole currency units, half away from zero
    pub fn from_f64_rounded(value: f64) -> Result<Self> {
        let d = Decimal::from_f64(value).ok_or_else(|| LoanError::CalculationError {
            message: format!("{} is not representable as money", value),
        })?;
        Ok(Money(d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// value as f64 for the floating-point engine
    pub fn to_f64(&self) -> Result<f64> {
        to_f64(self.0)
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money(self.0 * other)
    }
}

/// rate type for interest rates (0.16 for 16%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal (e.g., 0.16 for 16%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from percentage (e.g., 16 for 16%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::from(100))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::from(100)
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn to_f64(&self) -> Result<f64> {
        to_f64(self.0)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

/// convert a decimal into the engine's double precision
pub fn to_f64(d: Decimal) -> Result<f64> {
    d.to_f64().ok_or_else(|| LoanError::CalculationError {
        message: format!("{} does not fit in f64", d),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_rounding_matches_display() {
        assert_eq!(Money::from_f64_rounded(2886.2209991275845).unwrap(), Money::from_major(2886));
        assert_eq!(Money::from_f64_rounded(2886.5).unwrap(), Money::from_major(2887));
        assert_eq!(Money::from_f64_rounded(0.4).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_money_rejects_non_finite() {
        assert!(Money::from_f64_rounded(f64::NAN).is_err());
        assert!(Money::from_f64_rounded(f64::INFINITY).is_err());
    }

    #[test]
    fn test_money_arithmetic() {
        let mut total = Money::from_major(2886);
        total += Money::from_major(300);
        assert_eq!(total, Money::from_major(3186));
        assert_eq!(total - Money::from_major(186), Money::from_major(3000));
        assert_eq!(Money::from_major(100) * dec!(1.5), Money::from_major(150));
        assert!(Money::from_major(-1).is_negative());
        assert!(!Money::ZERO.is_negative());
    }

    #[test]
    fn test_rate_constructors() {
        assert_eq!(Rate::from_percentage(16).as_decimal(), dec!(0.16));
        assert_eq!(Rate::from_percentage(16).to_string(), "16%");
        assert_eq!(Rate::from_percentage(16).to_f64().unwrap(), 0.16);
    }
}
