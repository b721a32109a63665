//! Filesystem operations layered on decomposed path values.
//!
//! Everything here is a thin blocking wrapper around the host OS file
//! APIs: queries ([`query`]) never modify anything, mutations
//! ([`mutate`]) either complete fully or fail with the receiver's
//! in-memory state intact.

pub mod mutate;
pub mod query;

pub use query::{glob, which};
