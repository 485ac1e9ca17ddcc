//! Profile domain module.
//!
//! # Module Structure
//!
//! - `model`: The `Profile` record and its defaults
//! - `field`: Text fields editable through the generic field update
//! - `validation`: Required-field rules applied on submit
//! - `repository`: The key-value `ProfileStore` boundary
//!
//! # Usage
//!
//! ```ignore
//! use profile_core::profile::{Profile, ProfileField, ProfileStore, PROFILE_STORAGE_KEY};
//! ```

mod field;
mod model;
mod repository;
mod validation;

// Re-export public API
pub use field::{ParseFieldError, ProfileField};
pub use model::{DEFAULT_BIO, DEFAULT_FIRST_NAME, DEFAULT_LAST_NAME, DEFAULT_NATIONALITY, Profile};
pub use repository::{PROFILE_STORAGE_KEY, ProfileStore};
pub use validation::{REQUIRED_FIELDS, ValidationError};
