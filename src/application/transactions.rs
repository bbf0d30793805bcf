use crate::domain::pix_key::PixKeyKind;
use crate::domain::ports::{PixKeyRepositoryBox, TransactionRepositoryBox};
use crate::domain::transaction::{Transaction, Transition, TransitionPolicy};
use crate::error::{PixError, Result};
use rust_decimal::Decimal;

/// Registers pix transfers and drives them through their lifecycle.
///
/// The use case holds no state of its own: every call resolves entities through
/// the injected repositories, so concurrent transitions on the same transaction
/// id must be serialized by the caller.
pub struct TransactionUseCase {
    transactions: TransactionRepositoryBox,
    pix_keys: PixKeyRepositoryBox,
    policy: TransitionPolicy,
}

impl TransactionUseCase {
    /// Creates a use case applying transitions with [`TransitionPolicy::Permissive`].
    ///
    /// # Arguments
    ///
    /// * `transactions` - The store transactions are saved to and loaded from.
    /// * `pix_keys` - Lookup for source accounts and destination keys.
    pub fn new(transactions: TransactionRepositoryBox, pix_keys: PixKeyRepositoryBox) -> Self {
        Self {
            transactions,
            pix_keys,
            policy: TransitionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Creates a `pending` transfer from `account_id` to the owner of the pix key
    /// identified by (`pix_key_to`, `pix_key_kind_to`).
    ///
    /// An empty `id` makes the transaction get a generated one. An id that is
    /// already stored fails with [`PixError::PersistenceError`] and leaves the
    /// stored transaction untouched.
    pub async fn register(
        &self,
        account_id: &str,
        amount: Decimal,
        pix_key_to: &str,
        pix_key_kind_to: &str,
        description: &str,
        id: &str,
    ) -> Result<Transaction> {
        let account = self
            .pix_keys
            .find_account(account_id)
            .await?
            .ok_or_else(|| PixError::not_found("account", account_id))?;

        let kind: PixKeyKind = pix_key_kind_to.parse()?;
        let pix_key = self
            .pix_keys
            .find_key_by_kind(pix_key_to, kind)
            .await?
            .ok_or_else(|| PixError::not_found("pix key", format!("{}:{}", kind, pix_key_to)))?;

        let transaction = Transaction::new(account, amount, pix_key, description, id)?;
        let transaction = stored(self.transactions.register(transaction).await?)?;

        tracing::debug!(
            transaction_id = %transaction.id,
            account_from = %transaction.account_from.id,
            amount = %transaction.amount,
            "Transaction registered"
        );
        Ok(transaction)
    }

    pub async fn confirm(&self, transaction_id: &str) -> Result<Transaction> {
        self.transition(transaction_id, Transition::Confirm).await
    }

    pub async fn complete(&self, transaction_id: &str) -> Result<Transaction> {
        self.transition(transaction_id, Transition::Complete).await
    }

    /// Moves the transaction to `error`, recording `reason` as its cancel description.
    pub async fn error(&self, transaction_id: &str, reason: &str) -> Result<Transaction> {
        self.transition(transaction_id, Transition::Error(reason.to_string()))
            .await
    }

    async fn transition(&self, transaction_id: &str, transition: Transition) -> Result<Transaction> {
        let Some(mut transaction) = self.transactions.find(transaction_id).await? else {
            tracing::warn!(transaction_id, "Transaction not found");
            return Err(PixError::not_found("transaction", transaction_id));
        };

        let from = transaction.status;
        transaction.apply(transition, self.policy)?;
        let transaction = stored(self.transactions.save(transaction).await?)?;

        tracing::debug!(
            transaction_id,
            from = %from,
            to = %transaction.status,
            "Transaction status changed"
        );
        Ok(transaction)
    }
}

/// A write only counts when the store hands back an entity with an identity.
fn stored(transaction: Transaction) -> Result<Transaction> {
    if transaction.id.is_empty() {
        return Err(PixError::PersistenceError(
            "Unable to process this transaction".to_string(),
        ));
    }
    Ok(transaction)
}
