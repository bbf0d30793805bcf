use crate::application::pix_keys::PixKeyUseCase;
use crate::domain::account::Account;
use crate::domain::bank::Bank;
use crate::error::{PixError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq)]
pub struct BankRecord {
    pub id: String,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct AccountRecord {
    pub id: String,
    pub bank_id: String,
    pub owner_name: String,
    pub number: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct PixKeyRecord {
    pub account_id: String,
    pub kind: String,
    pub key: String,
}

/// Banks, accounts and pix keys to register before any transfer is processed.
///
/// ```json
/// {
///   "banks": [{ "id": "B1", "code": "001", "name": "Bank One" }],
///   "accounts": [{ "id": "A1", "bank_id": "B1", "owner_name": "Alice", "number": "0001" }],
///   "pix_keys": [{ "account_id": "A1", "kind": "email", "key": "alice@example.com" }]
/// }
/// ```
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Seed {
    #[serde(default)]
    pub banks: Vec<BankRecord>,
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
    #[serde(default)]
    pub pix_keys: Vec<PixKeyRecord>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub banks: usize,
    pub accounts: usize,
    pub pix_keys: usize,
}

impl Seed {
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }

    /// Registers every record, banks first. Stops at the first failure.
    pub async fn apply(self, use_case: &PixKeyUseCase) -> Result<SeedSummary> {
        let mut banks = HashMap::new();
        for record in self.banks {
            let bank = Bank::with_id(record.id, record.code, record.name)?;
            use_case.add_bank(bank.clone()).await?;
            banks.insert(bank.id.clone(), bank);
        }

        for record in &self.accounts {
            let bank = banks
                .get(&record.bank_id)
                .ok_or_else(|| PixError::not_found("bank", &record.bank_id))?;
            let account =
                Account::with_id(&record.id, bank, &record.number, &record.owner_name)?;
            use_case.add_account(account).await?;
        }

        for record in &self.pix_keys {
            use_case
                .register_key(&record.key, &record.kind, &record.account_id)
                .await?;
        }

        let summary = SeedSummary {
            banks: banks.len(),
            accounts: self.accounts.len(),
            pix_keys: self.pix_keys.len(),
        };
        tracing::info!(
            banks = summary.banks,
            accounts = summary.accounts,
            pix_keys = summary.pix_keys,
            "Seed applied"
        );
        Ok(summary)
    }
}
