//! Typed invariant checks shared by the entity constructors.
//!
//! Field-presence checks and domain rules are gathered independently so a
//! caller can inspect every broken rule, while the first reported violation
//! is always a domain rule when one was broken.

use crate::error::{PixError, Result};
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("the amount must be greater than 0, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
    #[error("invalid pix key kind: {0:?}")]
    InvalidKind(String),
    #[error("invalid pix key status: {0:?}")]
    InvalidPixKeyStatus(String),
    #[error("invalid transaction status: {0:?}")]
    InvalidTransactionStatus(String),
    #[error("the source and destination account cannot be the same: {account_id}")]
    SelfTransfer { account_id: String },
    #[error("illegal transition from {from} to {to}")]
    IllegalTransition { from: String, to: String },
}

impl Violation {
    /// Whether this is a domain rule rather than a generic field check.
    pub fn is_domain_rule(&self) -> bool {
        !matches!(self, Violation::Missing { .. })
    }
}

/// Every violation found by one validation pass, domain rules first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn single(violation: Violation) -> Self {
        Self(vec![violation])
    }

    /// The reason reported when only one failure can be shown.
    pub fn primary(&self) -> &Violation {
        &self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn contains(&self, violation: &Violation) -> bool {
        self.0.contains(violation)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl From<Violation> for PixError {
    fn from(violation: Violation) -> Self {
        PixError::ValidationError(Violations::single(violation))
    }
}

#[derive(Default)]
pub(crate) struct Validator {
    fields: Vec<Violation>,
    rules: Vec<Violation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(mut self, field: &'static str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.fields.push(Violation::Missing { field });
        }
        self
    }

    pub fn rule(mut self, holds: bool, violation: impl FnOnce() -> Violation) -> Self {
        if !holds {
            self.rules.push(violation());
        }
        self
    }

    pub fn finish(self) -> Result<()> {
        let Validator { fields, mut rules } = self;
        if rules.is_empty() && fields.is_empty() {
            return Ok(());
        }
        rules.extend(fields);
        Err(PixError::ValidationError(Violations(rules)))
    }
}
