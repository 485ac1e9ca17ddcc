//! Loads `config.toml`.

use std::path::Path;

use profile_core::config::AppConfig;
use profile_core::error::{ProfileError, Result};

pub struct ConfigService;

impl ConfigService {
    /// Reads the configuration at `path`.
    ///
    /// A missing file yields the defaults; an unreadable or malformed file is
    /// a `ProfileError::Config`.
    pub async fn load(path: &Path) -> Result<AppConfig> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("[ConfigService] No config at {:?}, using defaults", path);
                return Ok(AppConfig::default());
            }
            Err(e) => {
                return Err(ProfileError::config(format!(
                    "Failed to read {:?}: {}",
                    path, e
                )));
            }
        };

        toml::from_str(&content)
            .map_err(|e| ProfileError::config(format!("Invalid config {:?}: {}", path, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigService::load(&temp_dir.path().join("config.toml"))
            .await
            .unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn test_reads_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\ndir = \"/srv/profile\"\n\n[logging]\nlevel = \"debug\"\nfile = false\n",
        )
        .unwrap();

        let config = ConfigService::load(&path).await.unwrap();
        assert_eq!(config.storage.dir, Some(PathBuf::from("/srv/profile")));
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.file);
    }

    #[tokio::test]
    async fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[logging\nlevel = ").unwrap();

        let err = ConfigService::load(&path).await.unwrap_err();
        assert!(err.is_config());
    }
}
