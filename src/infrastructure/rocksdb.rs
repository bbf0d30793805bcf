use crate::domain::account::Account;
use crate::domain::bank::Bank;
use crate::domain::pix_key::{PixKey, PixKeyKind};
use crate::domain::ports::{PixKeyRepository, TransactionRepository};
use crate::domain::transaction::Transaction;
use crate::error::{PixError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for banks, keyed by bank id.
pub const CF_BANKS: &str = "banks";
/// Column Family for accounts, keyed by account id.
pub const CF_ACCOUNTS: &str = "accounts";
/// Column Family for pix keys, keyed by `kind:key`.
pub const CF_PIX_KEYS: &str = "pix_keys";
/// Column Family for transactions, keyed by transaction id.
pub const CF_TRANSACTIONS: &str = "transactions";

/// A persistent store implementation using RocksDB.
///
/// Implements both repository contracts over one database, one column family
/// per entity. Values are JSON documents.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
/// Insert-only writes hold `inserts` across their existence check and put, so
/// two clones racing on the same key cannot both succeed.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    inserts: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path, creating any
    /// missing column family.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let descriptors = [CF_BANKS, CF_ACCOUNTS, CF_PIX_KEYS, CF_TRANSACTIONS]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()));

        let db = DB::open_cf_descriptors(&opts, path, descriptors)?;

        Ok(Self {
            db: Arc::new(db),
            inserts: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            PixError::InternalError(Box::new(std::io::Error::other(format!(
                "{} column family not found",
                name
            ))))
        })
    }

    fn put<T: Serialize>(&self, cf: &str, key: &str, value: &T) -> Result<()> {
        let handle = self.cf(cf)?;
        let bytes = serde_json::to_vec(value)?;
        self.db.put_cf(handle, key.as_bytes(), bytes)?;
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, cf: &str, key: &str) -> Result<Option<T>> {
        let handle = self.cf(cf)?;
        match self.db.get_pinned_cf(handle, key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn exists(&self, cf: &str, key: &str) -> Result<bool> {
        let handle = self.cf(cf)?;
        Ok(self.db.get_pinned_cf(handle, key.as_bytes())?.is_some())
    }
}

fn pix_key_index(kind: PixKeyKind, key: &str) -> String {
    format!("{}:{}", kind, key)
}

#[async_trait]
impl PixKeyRepository for RocksDBStore {
    async fn register_key(&self, pix_key: PixKey) -> Result<PixKey> {
        let _guard = self.inserts.lock().await;
        if !self.exists(CF_ACCOUNTS, &pix_key.account_id)? {
            return Err(PixError::not_found("account", &pix_key.account_id));
        }
        let index = pix_key_index(pix_key.kind, &pix_key.key);
        if self.exists(CF_PIX_KEYS, &index)? {
            return Err(PixError::PersistenceError(format!(
                "pix key {} already registered",
                index
            )));
        }
        self.put(CF_PIX_KEYS, &index, &pix_key)?;
        Ok(pix_key)
    }

    async fn find_key_by_kind(&self, key: &str, kind: PixKeyKind) -> Result<Option<PixKey>> {
        self.get(CF_PIX_KEYS, &pix_key_index(kind, key))
    }

    async fn add_bank(&self, bank: Bank) -> Result<()> {
        self.put(CF_BANKS, &bank.id, &bank)
    }

    async fn add_account(&self, account: Account) -> Result<()> {
        if !self.exists(CF_BANKS, &account.bank_id)? {
            return Err(PixError::not_found("bank", &account.bank_id));
        }
        self.put(CF_ACCOUNTS, &account.id, &account)
    }

    async fn find_account(&self, id: &str) -> Result<Option<Account>> {
        self.get(CF_ACCOUNTS, id)
    }
}

#[async_trait]
impl TransactionRepository for RocksDBStore {
    async fn register(&self, transaction: Transaction) -> Result<Transaction> {
        let _guard = self.inserts.lock().await;
        if self.exists(CF_TRANSACTIONS, &transaction.id)? {
            return Err(PixError::PersistenceError(format!(
                "transaction {} already registered",
                transaction.id
            )));
        }
        self.put(CF_TRANSACTIONS, &transaction.id, &transaction)?;
        Ok(transaction)
    }

    async fn save(&self, transaction: Transaction) -> Result<Transaction> {
        self.put(CF_TRANSACTIONS, &transaction.id, &transaction)?;
        Ok(transaction)
    }

    async fn find(&self, id: &str) -> Result<Option<Transaction>> {
        self.get(CF_TRANSACTIONS, id)
    }
}
