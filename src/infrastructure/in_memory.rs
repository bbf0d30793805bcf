use crate::domain::account::Account;
use crate::domain::bank::Bank;
use crate::domain::pix_key::{PixKey, PixKeyKind};
use crate::domain::ports::{PixKeyRepository, TransactionRepository};
use crate::domain::transaction::Transaction;
use crate::error::{PixError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Directory {
    banks: HashMap<String, Bank>,
    accounts: HashMap<String, Account>,
    pix_keys: HashMap<(PixKeyKind, String), PixKey>,
}

/// A thread-safe in-memory directory of banks, accounts and pix keys.
///
/// Cloning shares the underlying maps, so a clone handed to the use cases sees
/// everything registered through any other clone.
#[derive(Default, Clone)]
pub struct InMemoryPixKeyRepository {
    directory: Arc<RwLock<Directory>>,
}

impl InMemoryPixKeyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PixKeyRepository for InMemoryPixKeyRepository {
    async fn register_key(&self, pix_key: PixKey) -> Result<PixKey> {
        let mut directory = self.directory.write().await;
        if !directory.accounts.contains_key(&pix_key.account_id) {
            return Err(PixError::not_found("account", &pix_key.account_id));
        }
        let index = (pix_key.kind, pix_key.key.clone());
        if directory.pix_keys.contains_key(&index) {
            return Err(PixError::PersistenceError(format!(
                "pix key {}:{} already registered",
                pix_key.kind, pix_key.key
            )));
        }
        directory.pix_keys.insert(index, pix_key.clone());
        Ok(pix_key)
    }

    async fn find_key_by_kind(&self, key: &str, kind: PixKeyKind) -> Result<Option<PixKey>> {
        let directory = self.directory.read().await;
        Ok(directory.pix_keys.get(&(kind, key.to_string())).cloned())
    }

    async fn add_bank(&self, bank: Bank) -> Result<()> {
        let mut directory = self.directory.write().await;
        directory.banks.insert(bank.id.clone(), bank);
        Ok(())
    }

    async fn add_account(&self, account: Account) -> Result<()> {
        let mut directory = self.directory.write().await;
        if !directory.banks.contains_key(&account.bank_id) {
            return Err(PixError::not_found("bank", &account.bank_id));
        }
        directory.accounts.insert(account.id.clone(), account);
        Ok(())
    }

    async fn find_account(&self, id: &str) -> Result<Option<Account>> {
        let directory = self.directory.read().await;
        Ok(directory.accounts.get(id).cloned())
    }
}

/// A thread-safe in-memory transaction store keyed by transaction id.
#[derive(Default, Clone)]
pub struct InMemoryTransactionRepository {
    transactions: Arc<RwLock<HashMap<String, Transaction>>>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn register(&self, transaction: Transaction) -> Result<Transaction> {
        let mut transactions = self.transactions.write().await;
        if transactions.contains_key(&transaction.id) {
            return Err(PixError::PersistenceError(format!(
                "transaction {} already registered",
                transaction.id
            )));
        }
        transactions.insert(transaction.id.clone(), transaction.clone());
        Ok(transaction)
    }

    async fn save(&self, transaction: Transaction) -> Result<Transaction> {
        let mut transactions = self.transactions.write().await;
        transactions.insert(transaction.id.clone(), transaction.clone());
        Ok(transaction)
    }

    async fn find(&self, id: &str) -> Result<Option<Transaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(id).cloned())
    }
}
