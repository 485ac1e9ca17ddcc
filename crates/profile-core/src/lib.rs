//! Domain layer for the student profile editor.
//!
//! Holds the single `Profile` record, its validation rules, and the two
//! boundaries the application talks to: the key-value `ProfileStore` and the
//! platform `ImagePicker`.

pub mod config;
pub mod error;
pub mod picker;
pub mod profile;

// Re-export common error type
pub use error::{ProfileError, Result};
pub use profile::{Profile, ProfileField};
