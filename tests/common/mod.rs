#![allow(dead_code)]

use std::io::{Error, Write};
use tempfile::NamedTempFile;

/// Bank B1 with Alice (A1, owns `alice@example.com`) and Bob (A2, owns
/// `bob@example.com` and CPF `12345678900`).
pub const SEED: &str = r#"{
    "banks": [{ "id": "B1", "code": "001", "name": "Bank One" }],
    "accounts": [
        { "id": "A1", "bank_id": "B1", "owner_name": "Alice", "number": "0001" },
        { "id": "A2", "bank_id": "B1", "owner_name": "Bob", "number": "0002" }
    ],
    "pix_keys": [
        { "account_id": "A1", "kind": "email", "key": "alice@example.com" },
        { "account_id": "A2", "kind": "email", "key": "bob@example.com" },
        { "account_id": "A2", "kind": "cpf", "key": "12345678900" }
    ]
}"#;

pub const HEADER: &str = "op, transaction, account, amount, pix_key, kind, description, reason";

pub fn seed_file() -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    file.write_all(SEED.as_bytes())?;
    Ok(file)
}

pub fn commands_file(rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{}", HEADER)?;
    for row in rows {
        writeln!(file, "{}", row)?;
    }
    Ok(file)
}
