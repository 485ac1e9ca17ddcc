//! Path resolution for profile data, configuration and logs.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/student-profile/     # Config directory
//! └── config.toml                # Application configuration
//!
//! ~/.local/share/student-profile/  # Data directory
//! ├── profile.json                 # The profile record
//! └── logs/                        # Application logs
//!     └── student-profile.log.YYYY-MM-DD
//! ```
//!
//! With an explicit base directory everything lives under that directory.

use std::path::PathBuf;

use thiserror::Error;

use profile_core::error::ProfileError;

pub const APP_DIR_NAME: &str = "student-profile";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Home directory could not be determined.
    #[error("Cannot find home directory")]
    HomeDirNotFound,
}

impl From<PathError> for ProfileError {
    fn from(err: PathError) -> Self {
        ProfileError::config(err.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfilePaths {
    base_dir: Option<PathBuf>,
}

impl ProfilePaths {
    /// `base_dir` overrides the platform directories when given.
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// Directory holding the profile record.
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn log_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }
}
