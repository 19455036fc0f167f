use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

use crate::config::ProductConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::terms::{LoanTerms, LoanTermsBuilder};
use crate::types::LoanId;

/// key under which the active loan is stored
pub const LOAN_KEY: &str = "mslice_loan";

/// external key-value persistence
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

/// in-process store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// durable record of the active loan, in the web client's json layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    #[serde(default = "Uuid::new_v4")]
    pub loan_id: LoanId,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub tenure: u32,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub paid_emis: Vec<u32>,
}

impl LoanRecord {
    pub fn new(amount: Money, tenure: u32, start_date: DateTime<Utc>) -> Self {
        Self {
            loan_id: Uuid::new_v4(),
            amount: amount.as_decimal(),
            tenure,
            start_date,
            paid_emis: Vec::new(),
        }
    }

    pub fn principal(&self) -> Money {
        Money::from_decimal(self.amount)
    }

    /// paid indices as a set snapshot
    pub fn paid_set(&self) -> BTreeSet<u32> {
        self.paid_emis.iter().copied().collect()
    }

    pub fn is_paid(&self, index: u32) -> bool {
        self.paid_emis.contains(&index)
    }

    /// record a payment; returns false if it was already recorded
    pub fn mark_paid(&mut self, index: u32) -> bool {
        if self.is_paid(index) {
            return false;
        }
        self.paid_emis.push(index);
        true
    }

    /// terms of this loan under a product configuration
    pub fn terms(&self, config: &ProductConfig) -> Result<LoanTerms> {
        LoanTermsBuilder::from_config(config)
            .amount(self.principal())
            .tenure(self.tenure)
            .start_date(self.start_date.date_naive())
            .build()
    }
}

/// reads and writes the loan record through a key-value store
pub struct LoanStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> LoanStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn load(&self) -> Result<Option<LoanRecord>> {
        match self.backend.get(LOAN_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn save(&mut self, record: &LoanRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.backend.set(LOAN_KEY, json)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }
}
