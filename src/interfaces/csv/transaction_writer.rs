use crate::domain::transaction::{Transaction, TransactionStatus};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct TransactionRecord<'a> {
    id: &'a str,
    account_from: &'a str,
    pix_key_to: &'a str,
    amount: Decimal,
    status: TransactionStatus,
    description: &'a str,
    cancel_description: Option<&'a str>,
}

impl<'a> From<&'a Transaction> for TransactionRecord<'a> {
    fn from(tx: &'a Transaction) -> Self {
        Self {
            id: &tx.id,
            account_from: &tx.account_from.id,
            pix_key_to: &tx.pix_key_to.key,
            amount: tx.amount,
            status: tx.status,
            description: &tx.description,
            cancel_description: tx.cancel_description.as_deref(),
        }
    }
}

/// Writes transaction states as CSV rows, header first.
pub struct TransactionWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TransactionWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_transaction(&mut self, transaction: &Transaction) -> Result<()> {
        self.writer.serialize(TransactionRecord::from(transaction))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
