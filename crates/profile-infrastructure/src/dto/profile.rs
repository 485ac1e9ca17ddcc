//! Profile record DTO and its text codec.
//!
//! The stored record is a JSON object with camelCase keys. The date of birth
//! travels as RFC 3339 text and is reparsed into a timestamp on every load.

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use profile_core::error::{ProfileError, Result};
use profile_core::picker::Locator;
use profile_core::profile::Profile;

/// On-disk shape of the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(default)]
    pub picture: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub nationality: String,
    #[serde(default)]
    pub bio: String,
}

// ============================================================================
// Domain model conversions
// ============================================================================

/// Convert domain model to record for persistence.
impl From<&Profile> for ProfileRecord {
    fn from(profile: &Profile) -> Self {
        Self {
            picture: profile.picture.as_ref().map(|l| l.as_str().to_string()),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            date_of_birth: format_date(&profile.date_of_birth),
            nationality: profile.nationality.clone(),
            bio: profile.bio.clone(),
        }
    }
}

impl TryFrom<ProfileRecord> for Profile {
    type Error = ProfileError;

    fn try_from(record: ProfileRecord) -> Result<Self> {
        Ok(Self {
            picture: record.picture.map(Locator::from),
            first_name: record.first_name,
            last_name: record.last_name,
            date_of_birth: parse_date(&record.date_of_birth)?,
            nationality: record.nationality,
            bio: record.bio,
        })
    }
}

// ============================================================================
// Codec
// ============================================================================

/// Encodes a profile as record text.
pub fn serialize(profile: &Profile) -> Result<String> {
    Ok(serde_json::to_string(&ProfileRecord::from(profile))?)
}

/// Decodes record text, reparsing the date of birth.
pub fn deserialize(text: &str) -> Result<Profile> {
    let record: ProfileRecord = serde_json::from_str(text)?;
    Profile::try_from(record)
}

/// Formats with full sub-second precision so a load reproduces the exact instant.
fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Accepts RFC 3339 with any offset, or a bare `YYYY-MM-DD` (midnight UTC).
fn parse_date(text: &str) -> Result<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Ok(date.with_timezone(&Utc));
    }

    let day = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| {
        ProfileError::serialization("date", format!("invalid dateOfBirth '{}': {}", text, e))
    })?;
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ProfileError::internal("midnight is always a valid time"))?;
    Ok(Utc.from_utc_datetime(&midnight))
}
