use crate::domain::account::Account;
use crate::domain::bank::Bank;
use crate::domain::pix_key::{PixKey, PixKeyKind};
use crate::domain::ports::PixKeyRepositoryBox;
use crate::error::{PixError, Result};

/// Registration and lookup of pix keys, plus the bank and account setup they
/// depend on.
pub struct PixKeyUseCase {
    pix_keys: PixKeyRepositoryBox,
}

impl PixKeyUseCase {
    pub fn new(pix_keys: PixKeyRepositoryBox) -> Self {
        Self { pix_keys }
    }

    pub async fn add_bank(&self, bank: Bank) -> Result<()> {
        tracing::debug!(bank_id = %bank.id, code = %bank.code, "Adding bank");
        self.pix_keys.add_bank(bank).await
    }

    pub async fn add_account(&self, account: Account) -> Result<()> {
        tracing::debug!(account_id = %account.id, bank_id = %account.bank_id, "Adding account");
        self.pix_keys.add_account(account).await
    }

    /// Registers `key` of `kind` for the account `account_id`.
    pub async fn register_key(&self, key: &str, kind: &str, account_id: &str) -> Result<PixKey> {
        let account = self
            .pix_keys
            .find_account(account_id)
            .await?
            .ok_or_else(|| PixError::not_found("account", account_id))?;

        let pix_key = PixKey::new(kind, &account, key)?;
        let pix_key = self.pix_keys.register_key(pix_key).await?;

        tracing::debug!(
            pix_key_id = %pix_key.id,
            kind = %pix_key.kind,
            account_id,
            "Pix key registered"
        );
        Ok(pix_key)
    }

    pub async fn find_key(&self, key: &str, kind: &str) -> Result<PixKey> {
        let kind: PixKeyKind = kind.parse()?;
        match self.pix_keys.find_key_by_kind(key, kind).await? {
            Some(pix_key) => Ok(pix_key),
            None => {
                tracing::warn!(key, kind = %kind, "Pix key not found");
                Err(PixError::not_found("pix key", format!("{}:{}", kind, key)))
            }
        }
    }
}
