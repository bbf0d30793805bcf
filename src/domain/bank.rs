use super::validation::Validator;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A participating bank. Accounts belong to exactly one bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub id: String,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Bank {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        Self::with_id(Uuid::new_v4().to_string(), code, name)
    }

    pub fn with_id(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self> {
        let bank = Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            created_at: Utc::now(),
        };
        bank.validate()?;
        Ok(bank)
    }

    pub fn validate(&self) -> Result<()> {
        Validator::new()
            .require("id", &self.id)
            .require("code", &self.code)
            .require("name", &self.name)
            .finish()
    }
}
