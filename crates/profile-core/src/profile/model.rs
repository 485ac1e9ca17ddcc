//! Profile domain model.
//!
//! There is exactly one profile per installation, so the record carries no
//! identifier.

use chrono::{DateTime, Utc};

use super::field::ProfileField;
use crate::picker::Locator;

pub const DEFAULT_FIRST_NAME: &str = "Jose";
pub const DEFAULT_LAST_NAME: &str = "Salgado";
pub const DEFAULT_NATIONALITY: &str = "Nicaraguan";
pub const DEFAULT_BIO: &str = "Tell us something about yourself!";

/// The student's personal profile.
///
/// `first_name`, `last_name` and `nationality` may be empty while a draft is
/// being edited; [`Profile::validate`] rejects that state before it is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Opaque reference to the chosen picture, if any
    pub picture: Option<Locator>,
    pub first_name: String,
    pub last_name: String,
    /// Falls back to the moment the profile was first created when never set
    pub date_of_birth: DateTime<Utc>,
    pub nationality: String,
    /// Free text, unconstrained
    pub bio: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            picture: None,
            first_name: DEFAULT_FIRST_NAME.to_string(),
            last_name: DEFAULT_LAST_NAME.to_string(),
            date_of_birth: Utc::now(),
            nationality: DEFAULT_NATIONALITY.to_string(),
            bio: DEFAULT_BIO.to_string(),
        }
    }
}

impl Profile {
    /// Returns the current value of a text field.
    pub fn field(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::Nationality => &self.nationality,
            ProfileField::Bio => &self.bio,
        }
    }

    /// Replaces a text field. No validation happens here.
    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ProfileField::FirstName => self.first_name = value,
            ProfileField::LastName => self.last_name = value,
            ProfileField::Nationality => self.nationality = value,
            ProfileField::Bio => self.bio = value,
        }
    }

    /// "First Last", as shown on the profile screen.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
