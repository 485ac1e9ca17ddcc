//! Text fields reachable through the generic field update.
//!
//! `picture` and `date_of_birth` have dedicated operations and are not listed.

use std::str::FromStr;

use strum::{Display, EnumIter};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ProfileField {
    FirstName,
    LastName,
    Nationality,
    Bio,
}

impl ProfileField {
    /// Human-readable label used in form prompts and messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Nationality => "Nationality",
            Self::Bio => "Bio",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown profile field '{0}' (expected first_name, last_name, nationality or bio)")]
pub struct ParseFieldError(pub String);

impl FromStr for ProfileField {
    type Err = ParseFieldError;

    /// Accepts snake_case, camelCase, kebab-case and spaced forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "firstname" | "first" => Ok(Self::FirstName),
            "lastname" | "last" => Ok(Self::LastName),
            "nationality" => Ok(Self::Nationality),
            "bio" => Ok(Self::Bio),
            _ => Err(ParseFieldError(s.to_string())),
        }
    }
}
