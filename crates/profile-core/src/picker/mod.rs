//! Image picker boundary.
//!
//! The platform owns permission prompts, cropping and encoding. The
//! application only ever sees the resulting [`Locator`].

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;

/// Opaque reference to an image resource (URI or path).
///
/// Meaningful only to the platform that produced it; never decoded here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Locator {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Locator {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Answer to a photo-library permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Hints passed to the picker. The picker decides how to honour them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickConstraints {
    /// Ask the platform editor for a 1:1 crop
    pub square_crop: bool,
    /// Compression quality in `0.0..=1.0`, `1.0` meaning no compression
    pub quality: f32,
}

impl PickConstraints {
    /// Square crop at full quality, used for the profile picture.
    pub fn profile_picture() -> Self {
        Self {
            square_crop: true,
            quality: 1.0,
        }
    }
}

/// Result of a pick request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickResult {
    /// The user dismissed the picker without choosing anything
    Cancelled,
    Selected { locator: Locator },
}

/// Platform capability for choosing an image from the user's library.
#[async_trait]
pub trait ImagePicker: Send + Sync {
    /// Asks the user for access to their photo library.
    async fn request_permission(&self) -> Result<PermissionStatus>;

    /// Presents the picker and waits for the user's choice.
    async fn pick_image(&self, constraints: PickConstraints) -> Result<PickResult>;
}
