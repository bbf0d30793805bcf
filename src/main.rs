use clap::{Parser, ValueEnum};
use codepix::application::pix_keys::PixKeyUseCase;
use codepix::application::transactions::TransactionUseCase;
use codepix::domain::ports::{PixKeyRepository, TransactionRepository};
use codepix::domain::transaction::TransitionPolicy;
use codepix::infrastructure::in_memory::{InMemoryPixKeyRepository, InMemoryTransactionRepository};
use codepix::interfaces::csv::command_reader::CommandReader;
use codepix::interfaces::csv::transaction_writer::TransactionWriter;
use codepix::interfaces::seed::Seed;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Transitions {
    /// Apply any transition regardless of the current status.
    Permissive,
    /// Reject transitions the lifecycle does not allow from the current status.
    Strict,
}

impl From<Transitions> for TransitionPolicy {
    fn from(value: Transitions) -> Self {
        match value {
            Transitions::Permissive => TransitionPolicy::Permissive,
            Transitions::Strict => TransitionPolicy::Strict,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input commands CSV file
    input: PathBuf,

    /// JSON file with banks, accounts and pix keys to register first
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// How strictly status transitions are checked
    #[arg(long, value_enum, default_value_t = Transitions::Permissive)]
    transitions: Transitions,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn use_cases<D, T>(directory: D, transactions: T) -> (PixKeyUseCase, TransactionUseCase)
where
    D: PixKeyRepository + Clone + 'static,
    T: TransactionRepository + 'static,
{
    (
        PixKeyUseCase::new(Box::new(directory.clone())),
        TransactionUseCase::new(Box::new(transactions), Box::new(directory)),
    )
}

fn in_memory() -> (PixKeyUseCase, TransactionUseCase) {
    use_cases(
        InMemoryPixKeyRepository::new(),
        InMemoryTransactionRepository::new(),
    )
}

#[cfg(feature = "storage-rocksdb")]
fn open_storage(db_path: Option<PathBuf>) -> Result<(PixKeyUseCase, TransactionUseCase)> {
    use codepix::infrastructure::rocksdb::RocksDBStore;

    match db_path {
        Some(path) => {
            let store = RocksDBStore::open(path).into_diagnostic()?;
            Ok(use_cases(store.clone(), store))
        }
        None => Ok(in_memory()),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_storage(db_path: Option<PathBuf>) -> Result<(PixKeyUseCase, TransactionUseCase)> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }
    Ok(in_memory())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();

    let (pix_keys, transactions) = open_storage(cli.db_path)?;
    let transactions = transactions.with_policy(cli.transitions.into());

    if let Some(seed_path) = cli.seed {
        let file = File::open(seed_path).into_diagnostic()?;
        let seed = Seed::from_reader(file).into_diagnostic()?;
        seed.apply(&pix_keys).await.into_diagnostic()?;
    }

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    let stdout = io::stdout();
    let mut writer = TransactionWriter::new(stdout.lock());

    for command in reader.commands() {
        match command {
            Ok(command) => match command.execute(&transactions).await {
                Ok(transaction) => writer.write_transaction(&transaction).into_diagnostic()?,
                Err(e) => {
                    tracing::warn!(op = ?command.op, transaction = %command.transaction, "Command failed: {}", e);
                }
            },
            Err(e) => {
                tracing::warn!("Error reading command: {}", e);
            }
        }
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}
