//! Persisted record formats.

pub mod profile;

pub use profile::{ProfileRecord, deserialize, serialize};
