//! Results of the controller's asynchronous operations.
//!
//! None of these operations fail outright; every path ends in a state the
//! screen can keep working from. User-facing messages are carried as
//! [`Notice`] values and never printed by the controller itself.

use profile_core::error::ProfileError;
use profile_core::picker::Locator;
use profile_core::profile::ValidationError;

/// Informational message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Photo library access was refused
    PhotoPermissionRequired,
    /// Save was attempted with required fields left empty
    MissingRequiredFields(ValidationError),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Self::PhotoPermissionRequired => {
                "Permission to access the photo library is required to change your picture."
                    .to_string()
            }
            Self::MissingRequiredFields(err) => err.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// A stored profile replaced the in-memory one
    Restored,
    /// Nothing stored yet; defaults kept
    NotFound,
    /// Read or decode failed; previous profile kept
    Failed(ProfileError),
}

#[derive(Debug, Clone)]
pub enum PictureOutcome {
    PermissionDenied,
    Cancelled,
    /// Picture applied in memory. `persisted` is false if the write failed.
    Updated { locator: Locator, persisted: bool },
    /// The picker itself failed; nothing changed
    Failed(ProfileError),
}

impl PictureOutcome {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::PermissionDenied => Some(Notice::PhotoPermissionRequired),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Draft written and committed; back to viewing
    Saved,
    /// Validation failed; still editing with the draft intact
    Rejected(ValidationError),
    /// Write failed; still editing with the draft intact
    NotPersisted(ProfileError),
    /// There was no edit session to submit
    NotEditing,
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Rejected(err) => Some(Notice::MissingRequiredFields(err.clone())),
            _ => None,
        }
    }
}
