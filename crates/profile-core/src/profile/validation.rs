//! Required-field validation applied when a draft is submitted.

use thiserror::Error;

use super::field::ProfileField;
use super::model::Profile;

/// Fields that must be non-empty for a draft to be saved, in display order.
pub const REQUIRED_FIELDS: [ProfileField; 3] = [
    ProfileField::FirstName,
    ProfileField::LastName,
    ProfileField::Nationality,
];

/// A draft failed the required-field check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in all required fields (missing: {})", labels(.missing))]
pub struct ValidationError {
    pub missing: Vec<ProfileField>,
}

fn labels(fields: &[ProfileField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Profile {
    /// Checks the required fields.
    ///
    /// Only the exact empty string counts as missing: whitespace is accepted
    /// as-is and `bio` is never checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<ProfileField> = REQUIRED_FIELDS
            .into_iter()
            .filter(|field| self.field(*field).is_empty())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}
