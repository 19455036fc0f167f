//! amortization engine: installment amount, schedule projection, totals
//!
//! Every function here is pure. The schedule is recomputed on each read from
//! the loan terms, the reference date and the set of paid installments.

pub mod dates;
pub mod emi;
pub mod generator;
pub mod status;
pub mod totals;

pub use emi::installment_amount;
pub use generator::{generate_schedule, Installment, Schedule, BALANCE_TOLERANCE};
pub use status::classify;
pub use totals::{aggregate, Totals};
