use crate::application::transactions::TransactionUseCase;
use crate::domain::transaction::Transaction;
use crate::domain::validation::Violation;
use crate::error::{PixError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Register,
    Confirm,
    Complete,
    Error,
}

/// One row of the commands file.
///
/// Columns a command does not use may be left empty.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Command {
    pub op: CommandType,
    /// Target transaction id; for `register`, the optional caller-supplied id.
    #[serde(default)]
    pub transaction: String,
    #[serde(default)]
    pub account: String,
    /// Kept as text so the decimal is parsed exactly, never through a float.
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub pix_key: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reason: String,
}

impl Command {
    /// The `amount` column as an exact decimal, with its scale preserved.
    pub fn amount(&self) -> Result<Decimal> {
        if self.amount.is_empty() {
            return Err(Violation::Missing { field: "amount" }.into());
        }
        Decimal::from_str(&self.amount)
            .map_err(|_| PixError::from(Violation::InvalidAmount(self.amount.clone())))
    }

    pub async fn execute(&self, use_case: &TransactionUseCase) -> Result<Transaction> {
        match self.op {
            CommandType::Register => {
                let amount = self.amount()?;
                use_case
                    .register(
                        &self.account,
                        amount,
                        &self.pix_key,
                        &self.kind,
                        &self.description,
                        &self.transaction,
                    )
                    .await
            }
            CommandType::Confirm => use_case.confirm(&self.transaction).await,
            CommandType::Complete => use_case.complete(&self.transaction).await,
            CommandType::Error => use_case.error(&self.transaction, &self.reason).await,
        }
    }
}

/// Reads lifecycle commands from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths, and
/// yields commands lazily so large files are streamed.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PixError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str = "op, transaction, account, amount, pix_key, kind, description, reason";

    #[test]
    fn test_reader_valid_stream() {
        let data = format!(
            "{HEADER}\n\
             register, T1, A1, 100.0, bob@example.com, email, pay,\n\
             confirm, T1, , , , , ,\n\
             error, T1, , , , , , insufficient funds"
        );
        let commands: Vec<Command> = CommandReader::new(data.as_bytes())
            .commands()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0].op, CommandType::Register);
        assert_eq!(commands[0].amount().unwrap(), dec!(100.0));
        assert_eq!(commands[0].pix_key, "bob@example.com");
        assert_eq!(commands[1].op, CommandType::Confirm);
        assert!(commands[1].amount.is_empty());
        assert_eq!(commands[2].reason, "insufficient funds");
    }

    #[test]
    fn test_reader_keeps_amount_precision_and_scale() {
        let data = format!(
            "{HEADER}\n\
             register, T1, A1, 12345678901234567.89, bob@example.com, email, pay,\n\
             register, T2, A1, 100.0, bob@example.com, email, pay,"
        );
        let commands: Vec<Command> = CommandReader::new(data.as_bytes())
            .commands()
            .collect::<Result<_>>()
            .unwrap();

        let precise = commands[0].amount().unwrap();
        assert_eq!(precise, dec!(12345678901234567.89));
        assert_eq!(precise.to_string(), "12345678901234567.89");

        let scaled = commands[1].amount().unwrap();
        assert_eq!(scaled.scale(), 1);
        assert_eq!(scaled.to_string(), "100.0");
    }

    #[test]
    fn test_malformed_amount_is_a_validation_error() {
        let data = format!("{HEADER}\nregister, T1, A1, 1.2.3, bob@example.com, email, pay,");
        let command = CommandReader::new(data.as_bytes())
            .commands()
            .next()
            .unwrap()
            .unwrap();

        let err = command.amount().unwrap_err();
        assert_eq!(
            err.violations().unwrap().primary(),
            &Violation::InvalidAmount("1.2.3".to_string())
        );
    }

    #[test]
    fn test_reader_unknown_op() {
        let data = format!("{HEADER}\nrefund, T1, , , , , ,");
        let results: Vec<Result<Command>> = CommandReader::new(data.as_bytes()).commands().collect();
        assert!(matches!(results[0], Err(PixError::CsvError(_))));
    }

    #[tokio::test]
    async fn test_register_without_amount_is_a_validation_error() {
        use crate::infrastructure::in_memory::{
            InMemoryPixKeyRepository, InMemoryTransactionRepository,
        };

        let use_case = TransactionUseCase::new(
            Box::new(InMemoryTransactionRepository::new()),
            Box::new(InMemoryPixKeyRepository::new()),
        );
        let data = format!("{HEADER}\nregister, , A1, , bob@example.com, email, pay,");
        let command = CommandReader::new(data.as_bytes())
            .commands()
            .next()
            .unwrap()
            .unwrap();

        let err = command.execute(&use_case).await.unwrap_err();
        assert_eq!(err.to_string(), "Validation error: amount is required");
    }
}
