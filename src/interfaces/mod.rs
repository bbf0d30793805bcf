//! Adapters between external data formats and the application layer.

pub mod csv;
pub mod seed;
