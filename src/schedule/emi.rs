use crate::errors::{LoanError, Result};

/// fixed periodic installment for an amortizing loan
///
/// `principal * r * (1 + r)^n / ((1 + r)^n - 1)`, evaluated in double
/// precision with no intermediate rounding. The growth term is computed with
/// `ln_1p`/`exp_m1` so rates too small to register in `1 + r` still amortize.
/// A zero principal yields zero and a zero rate yields `principal / n`.
pub fn installment_amount(principal: f64, periodic_rate: f64, tenure: u32) -> Result<f64> {
    if tenure == 0 {
        return Err(LoanError::InvalidTenure { tenure });
    }
    if !principal.is_finite() || principal < 0.0 {
        return Err(LoanError::CalculationError {
            message: format!("principal must be finite and non-negative, got {}", principal),
        });
    }
    if !periodic_rate.is_finite() || periodic_rate < 0.0 {
        return Err(LoanError::CalculationError {
            message: format!("periodic rate must be finite and non-negative, got {}", periodic_rate),
        });
    }

    if principal == 0.0 {
        return Ok(0.0);
    }

    let n = f64::from(tenure);

    if periodic_rate == 0.0 {
        return Ok(principal / n);
    }

    // growth = (1 + r)^n - 1, kept accurate for tiny r
    let growth = (n * periodic_rate.ln_1p()).exp_m1();
    if growth == 0.0 || growth.is_subnormal() {
        return Ok(principal / n);
    }
    let amount = principal * (periodic_rate + periodic_rate / growth);

    if !amount.is_finite() {
        return Err(LoanError::CalculationError {
            message: format!(
                "installment overflowed for rate {} over {} periods",
                periodic_rate, tenure
            ),
        });
    }

    Ok(amount)
}
