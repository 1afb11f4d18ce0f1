//! Store adapters implementing the database ports.

pub mod memory;

#[cfg(feature = "database")]
pub mod postgres;
