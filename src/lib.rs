pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod penalty;
pub mod schedule;
pub mod store;
pub mod terms;
pub mod tracker;
pub mod types;
pub mod view;

// re-export key types
pub use config::{ApplicationLimits, ProductConfig};
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use events::{EventStore, LoanEvent};
pub use penalty::LateFeePolicy;
pub use schedule::{
    aggregate, generate_schedule, installment_amount, Installment, Schedule, Totals,
};
pub use store::{KeyValueStore, LoanRecord, LoanStore, MemoryStore};
pub use terms::{LoanTerms, LoanTermsBuilder};
pub use tracker::{LoanTracker, PaymentReceipt};
pub use types::{InstallmentStatus, LoanId, RateConvention};
pub use view::DashboardView;

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
