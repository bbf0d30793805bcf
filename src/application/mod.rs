//! Application layer orchestrating repository lookups and entity rules.
//!
//! `TransactionUseCase` registers transfers and applies lifecycle transitions;
//! `PixKeyUseCase` covers key registration and lookup.

pub mod pix_keys;
pub mod transactions;
