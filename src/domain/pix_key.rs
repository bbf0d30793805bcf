use super::account::Account;
use super::validation::{Validator, Violation};
use crate::error::{PixError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixKeyKind {
    Email,
    Cpf,
}

impl PixKeyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PixKeyKind::Email => "email",
            PixKeyKind::Cpf => "cpf",
        }
    }
}

impl fmt::Display for PixKeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PixKeyKind {
    type Err = PixError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "email" => Ok(PixKeyKind::Email),
            "cpf" => Ok(PixKeyKind::Cpf),
            other => Err(Violation::InvalidKind(other.to_string()).into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixKeyStatus {
    Active,
    Inactive,
}

impl PixKeyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PixKeyStatus::Active => "active",
            PixKeyStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for PixKeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PixKeyStatus {
    type Err = PixError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(PixKeyStatus::Active),
            "inactive" => Ok(PixKeyStatus::Inactive),
            other => Err(Violation::InvalidPixKeyStatus(other.to_string()).into()),
        }
    }
}

/// An alias (email or CPF) that resolves to the account receiving a transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixKey {
    pub id: String,
    pub kind: PixKeyKind,
    /// The alias value itself, e.g. `bob@example.com`.
    pub key: String,
    /// Id of the owning account.
    pub account_id: String,
    pub status: PixKeyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PixKey {
    /// Registers a new, active key for `account`.
    ///
    /// `kind` must be one of `email` or `cpf`.
    pub fn new(kind: &str, account: &Account, key: impl Into<String>) -> Result<Self> {
        let kind: PixKeyKind = kind.parse()?;
        let now = Utc::now();
        let pix_key = Self {
            id: Uuid::new_v4().to_string(),
            kind,
            key: key.into(),
            account_id: account.id.clone(),
            status: PixKeyStatus::Active,
            created_at: now,
            updated_at: now,
        };
        pix_key.validate()?;
        Ok(pix_key)
    }

    pub fn validate(&self) -> Result<()> {
        Validator::new()
            .require("id", &self.id)
            .require("key", &self.key)
            .require("account_id", &self.account_id)
            .finish()
    }

    pub fn is_active(&self) -> bool {
        self.status == PixKeyStatus::Active
    }

    pub fn activate(&mut self) {
        self.status = PixKeyStatus::Active;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.status = PixKeyStatus::Inactive;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bank::Bank;

    fn account() -> Account {
        let bank = Bank::with_id("B1", "001", "Test Bank").unwrap();
        Account::with_id("A1", &bank, "0001", "Alice").unwrap()
    }

    #[test]
    fn test_new_pix_key_is_active() {
        let key = PixKey::new("email", &account(), "alice@example.com").unwrap();
        assert_eq!(key.kind, PixKeyKind::Email);
        assert_eq!(key.status, PixKeyStatus::Active);
        assert_eq!(key.account_id, "A1");
        assert!(key.is_active());
    }

    #[test]
    fn test_cpf_kind_accepted() {
        let key = PixKey::new("cpf", &account(), "12345678900").unwrap();
        assert_eq!(key.kind, PixKeyKind::Cpf);
    }

    #[test]
    fn test_unknown_kinds_rejected() {
        for kind in ["phone", "EMAIL", "", "random"] {
            let err = PixKey::new(kind, &account(), "value").unwrap_err();
            assert_eq!(
                err.violations().unwrap().primary(),
                &Violation::InvalidKind(kind.to_string()),
                "kind {kind:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = PixKey::new("email", &account(), "").unwrap_err();
        assert!(err.to_string().contains("key is required"));
    }

    #[test]
    fn test_status_parsing_is_closed() {
        assert_eq!("active".parse::<PixKeyStatus>().unwrap(), PixKeyStatus::Active);
        assert_eq!(
            "inactive".parse::<PixKeyStatus>().unwrap(),
            PixKeyStatus::Inactive
        );
        let err = "blocked".parse::<PixKeyStatus>().unwrap_err();
        assert_eq!(
            err.violations().unwrap().primary(),
            &Violation::InvalidPixKeyStatus("blocked".to_string())
        );
    }

    #[test]
    fn test_toggle_status() {
        let mut key = PixKey::new("email", &account(), "alice@example.com").unwrap();
        key.deactivate();
        assert_eq!(key.status, PixKeyStatus::Inactive);
        key.activate();
        assert!(key.is_active());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&PixKeyKind::Cpf).unwrap();
        assert_eq!(json, "\"cpf\"");
    }
}
