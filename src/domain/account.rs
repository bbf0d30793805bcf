use super::bank::Bank;
use super::validation::Validator;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bank account that can send transfers and own pix keys.
///
/// Accounts are created once and not mutated afterwards; the pix keys they own
/// are looked up through the repository rather than stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Opaque unique identifier.
    pub id: String,
    /// The bank holding this account.
    pub bank_id: String,
    pub owner_name: String,
    /// Account number within the bank.
    pub number: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Opens an account at `bank` with a generated id.
    pub fn new(
        bank: &Bank,
        number: impl Into<String>,
        owner_name: impl Into<String>,
    ) -> Result<Self> {
        Self::with_id(Uuid::new_v4().to_string(), bank, number, owner_name)
    }

    /// Opens an account with a known id, e.g. one assigned by the owning bank.
    pub fn with_id(
        id: impl Into<String>,
        bank: &Bank,
        number: impl Into<String>,
        owner_name: impl Into<String>,
    ) -> Result<Self> {
        let account = Self {
            id: id.into(),
            bank_id: bank.id.clone(),
            owner_name: owner_name.into(),
            number: number.into(),
            created_at: Utc::now(),
        };
        account.validate()?;
        Ok(account)
    }

    pub fn validate(&self) -> Result<()> {
        Validator::new()
            .require("id", &self.id)
            .require("bank_id", &self.bank_id)
            .require("owner_name", &self.owner_name)
            .require("number", &self.number)
            .finish()
    }
}
