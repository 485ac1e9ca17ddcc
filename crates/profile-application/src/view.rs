//! Display-ready snapshot of a profile.

use profile_core::profile::Profile;
use serde::Serialize;

/// Long-form date, e.g. "March 4, 2001".
pub const DATE_FORMAT: &str = "%B %-d, %Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    pub bio: String,
    pub date_of_birth: String,
    pub picture: Option<String>,
    /// True when the values shown come from an unsaved draft
    pub editing: bool,
}

impl ProfileView {
    pub fn new(profile: &Profile, editing: bool) -> Self {
        Self {
            full_name: profile.full_name(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            nationality: profile.nationality.clone(),
            bio: profile.bio.clone(),
            date_of_birth: profile.date_of_birth.format(DATE_FORMAT).to_string(),
            picture: profile.picture.as_ref().map(|l| l.to_string()),
            editing,
        }
    }

    pub fn picture_label(&self) -> &str {
        self.picture.as_deref().unwrap_or("(no picture)")
    }
}
