/// quick start - EMI and schedule for a loan, under both rate conventions
use std::collections::BTreeSet;

use emi_tracker_rs::chrono::NaiveDate;
use emi_tracker_rs::{aggregate, generate_schedule, LoanTermsBuilder, Money, ProductConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let start = NaiveDate::from_ymd_opt(2024, 1, 15).ok_or("bad date")?;

    for config in [ProductConfig::dashboard(), ProductConfig::landing_calculator()] {
        let terms = LoanTermsBuilder::from_config(&config)
            .amount(config.default_amount)
            .tenure(config.default_tenure)
            .start_date(start)
            .build()?;

        let schedule = generate_schedule(&terms, start, &BTreeSet::new())?;
        let totals = aggregate(&schedule);

        println!(
            "{} over {} months at {} ({:?}): EMI {}, interest {}, total {}",
            terms.principal,
            terms.tenure,
            terms.rate,
            terms.rate_convention,
            Money::from_f64_rounded(schedule.emi)?,
            Money::from_f64_rounded(totals.total_interest)?,
            Money::from_f64_rounded(totals.total_repayment)?,
        );

        for installment in &schedule.installments {
            println!(
                "  #{:>2} {}  principal {:>8.2}  interest {:>8.2}",
                installment.index,
                installment.due_date,
                installment.principal_component,
                installment.interest_component,
            );
        }
    }

    Ok(())
}
