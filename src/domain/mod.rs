//! Entities, their invariants, and the repository contracts they are loaded through.

pub mod account;
pub mod bank;
pub mod pix_key;
pub mod ports;
pub mod transaction;
pub mod validation;
