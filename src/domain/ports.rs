use super::account::Account;
use super::bank::Bank;
use super::pix_key::{PixKey, PixKeyKind};
use super::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;

/// Lookup and registration of banks, accounts and pix keys.
#[async_trait]
pub trait PixKeyRepository: Send + Sync {
    async fn register_key(&self, pix_key: PixKey) -> Result<PixKey>;
    async fn find_key_by_kind(&self, key: &str, kind: PixKeyKind) -> Result<Option<PixKey>>;
    async fn add_bank(&self, bank: Bank) -> Result<()>;
    async fn add_account(&self, account: Account) -> Result<()>;
    async fn find_account(&self, id: &str) -> Result<Option<Account>>;
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Inserts a transaction that must not exist yet and returns what was stored.
    async fn register(&self, transaction: Transaction) -> Result<Transaction>;
    /// Inserts or replaces a transaction and returns what was stored.
    async fn save(&self, transaction: Transaction) -> Result<Transaction>;
    async fn find(&self, id: &str) -> Result<Option<Transaction>>;
}

pub type PixKeyRepositoryBox = Box<dyn PixKeyRepository>;
pub type TransactionRepositoryBox = Box<dyn TransactionRepository>;
