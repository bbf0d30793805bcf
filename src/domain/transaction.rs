use super::account::Account;
use super::pix_key::PixKey;
use super::validation::{Validator, Violation};
use crate::error::{PixError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Completed,
    Error,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Error => "error",
        }
    }

    /// Whether the lifecycle table has an edge from `self` to `target`.
    pub fn can_transition_to(&self, target: TransactionStatus) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, target),
            (Pending, Confirmed) | (Confirmed, Completed) | (Pending | Confirmed | Completed, Error)
        )
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = PixError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "confirmed" => Ok(TransactionStatus::Confirmed),
            "completed" => Ok(TransactionStatus::Completed),
            "error" => Ok(TransactionStatus::Error),
            other => Err(Violation::InvalidTransactionStatus(other.to_string()).into()),
        }
    }
}

/// A lifecycle event applied to an existing transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Confirm,
    Complete,
    /// Cancels the transaction with the given reason.
    Error(String),
}

impl Transition {
    pub fn target(&self) -> TransactionStatus {
        match self {
            Transition::Confirm => TransactionStatus::Confirmed,
            Transition::Complete => TransactionStatus::Completed,
            Transition::Error(_) => TransactionStatus::Error,
        }
    }
}

/// How strictly the current status is checked before a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any transition is applied regardless of the current status.
    #[default]
    Permissive,
    /// Only edges of the lifecycle table, or a repeat of the current status.
    Strict,
}

impl TransitionPolicy {
    fn permits(&self, from: TransactionStatus, to: TransactionStatus) -> bool {
        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Strict => from == to || from.can_transition_to(to),
        }
    }
}

/// A single funds transfer from an account to the owner of a pix key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub account_from: Account,
    pub pix_key_to: PixKey,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub description: String,
    /// Set only when the transaction moves to `error`.
    pub cancel_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Builds a `pending` transaction, or fails without producing one.
    ///
    /// An empty `id` gets a generated UUID; a non-empty one is kept so external
    /// systems can correlate retries.
    pub fn new(
        account_from: Account,
        amount: Decimal,
        pix_key_to: PixKey,
        description: impl Into<String>,
        id: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        let id = if id.trim().is_empty() {
            Uuid::new_v4().to_string()
        } else {
            id
        };
        let now = Utc::now();
        let transaction = Self {
            id,
            account_from,
            pix_key_to,
            amount,
            status: TransactionStatus::Pending,
            description: description.into(),
            cancel_description: None,
            created_at: now,
            updated_at: now,
        };
        transaction.validate()?;
        Ok(transaction)
    }

    pub fn validate(&self) -> Result<()> {
        Validator::new()
            .require("id", &self.id)
            .require("account_from.id", &self.account_from.id)
            .require("pix_key_to.id", &self.pix_key_to.id)
            .require("pix_key_to.account_id", &self.pix_key_to.account_id)
            .rule(self.amount > Decimal::ZERO, || {
                Violation::NonPositiveAmount(self.amount)
            })
            .rule(self.pix_key_to.account_id != self.account_from.id, || {
                Violation::SelfTransfer {
                    account_id: self.account_from.id.clone(),
                }
            })
            .finish()
    }

    pub fn confirm(&mut self) -> Result<()> {
        self.apply(Transition::Confirm, TransitionPolicy::Permissive)
    }

    pub fn complete(&mut self) -> Result<()> {
        self.apply(Transition::Complete, TransitionPolicy::Permissive)
    }

    pub fn cancel(&mut self, reason: impl Into<String>) -> Result<()> {
        self.apply(Transition::Error(reason.into()), TransitionPolicy::Permissive)
    }

    /// Applies `transition` under `policy`.
    ///
    /// The result is validated before it is committed; on failure `self` is
    /// left untouched.
    pub fn apply(&mut self, transition: Transition, policy: TransitionPolicy) -> Result<()> {
        let target = transition.target();
        if !policy.permits(self.status, target) {
            return Err(Violation::IllegalTransition {
                from: self.status.to_string(),
                to: target.to_string(),
            }
            .into());
        }

        let mut next = self.clone();
        next.status = target;
        next.updated_at = Utc::now();
        if let Transition::Error(reason) = transition {
            next.cancel_description = Some(reason);
        }
        next.validate()?;

        *self = next;
        Ok(())
    }
}
