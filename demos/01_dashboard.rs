/// dashboard - open a loan, let time pass, pay installments, resume from storage
use emi_tracker_rs::chrono::{TimeZone, Utc};
use emi_tracker_rs::{LoanTracker, MemoryStore, Money, ProductConfig, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let opened_at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).single().ok_or("bad date")?;
    let mut tracker = LoanTracker::open(
        MemoryStore::new(),
        ProductConfig::dashboard(),
        Money::from_major(15_000),
        12,
        &SafeTimeProvider::new(TimeSource::Test(opened_at)),
    )?;

    // first installment paid on time
    let on_time = SafeTimeProvider::new(TimeSource::Test(opened_at + emi_tracker_rs::chrono::Duration::days(30)));
    let receipt = tracker.pay_next_due(&on_time)?;
    println!("paid #{} for {}", receipt.index, receipt.amount_charged);

    // second installment missed
    let late = SafeTimeProvider::new(TimeSource::Test(opened_at + emi_tracker_rs::chrono::Duration::days(70)));
    let view = tracker.view(&late)?;
    println!("{}", view.to_json_pretty()?);

    let receipt = tracker.pay_next_due(&late)?;
    println!(
        "paid #{} for {} (late fee {})",
        receipt.index, receipt.amount_charged, receipt.late_fee
    );

    // reload from storage as a new session would
    let backend = tracker.into_backend();
    if let Some(resumed) = LoanTracker::resume(backend, ProductConfig::dashboard())? {
        let totals = resumed.totals(&late)?;
        println!(
            "resumed loan {}: {} of {} paid, {:.1}% done",
            resumed.loan_id(),
            totals.paid_count,
            resumed.terms().tenure,
            totals.progress_percent
        );
    }

    Ok(())
}
