//! Terminal stand-in for the platform image picker.
//!
//! Permission is a y/n question remembered for the rest of the session, and
//! "picking" means typing the path of an image file. The file is not opened:
//! its extension decides whether it counts as an image.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use url::Url;

use profile_core::error::{ProfileError, Result};
use profile_core::picker::{ImagePicker, Locator, PermissionStatus, PickConstraints, PickResult};

/// Source of single-line answers.
pub trait LinePrompt: Send + Sync {
    /// Shows `question` and returns the answer, or `None` at end of input.
    fn ask(&self, question: &str) -> io::Result<Option<String>>;
}

/// Reads answers from stdin.
pub struct StdinPrompt;

impl LinePrompt for StdinPrompt {
    fn ask(&self, question: &str) -> io::Result<Option<String>> {
        print!("{}", question);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

pub struct TerminalImagePicker {
    prompt: Arc<dyn LinePrompt>,
    granted: AtomicBool,
}

impl TerminalImagePicker {
    pub fn new(prompt: Arc<dyn LinePrompt>) -> Self {
        Self {
            prompt,
            granted: AtomicBool::new(false),
        }
    }

    async fn ask(&self, question: String) -> Result<Option<String>> {
        let prompt = self.prompt.clone();
        tokio::task::spawn_blocking(move || prompt.ask(&question))
            .await
            .map_err(|e| ProfileError::internal(format!("Failed to join task: {}", e)))?
            .map_err(|e| ProfileError::picker(format!("Failed to read answer: {}", e)))
    }
}

#[async_trait]
impl ImagePicker for TerminalImagePicker {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        if self.granted.load(Ordering::Relaxed) {
            return Ok(PermissionStatus::Granted);
        }

        let answer = self
            .ask("Allow access to your pictures? [y/N] ".to_string())
            .await?;
        let granted = matches!(
            answer.as_deref().map(str::trim).map(str::to_ascii_lowercase).as_deref(),
            Some("y" | "yes")
        );

        if granted {
            self.granted.store(true, Ordering::Relaxed);
            Ok(PermissionStatus::Granted)
        } else {
            Ok(PermissionStatus::Denied)
        }
    }

    async fn pick_image(&self, constraints: PickConstraints) -> Result<PickResult> {
        tracing::debug!(
            "[TerminalImagePicker] square_crop={} quality={}",
            constraints.square_crop,
            constraints.quality
        );

        loop {
            let answer = self
                .ask("Path to image (empty to cancel): ".to_string())
                .await?;
            let Some(answer) = answer.filter(|a| !a.trim().is_empty()) else {
                return Ok(PickResult::Cancelled);
            };

            match resolve_locator(&answer) {
                Ok(locator) => return Ok(PickResult::Selected { locator }),
                Err(reason) => println!("{}", reason),
            }
        }
    }
}

/// Turns a typed path into a percent-encoded `file://` URL if it names an
/// image file.
pub fn resolve_locator(input: &str) -> std::result::Result<Locator, String> {
    let trimmed = input.trim().trim_matches(|c| c == '"' || c == '\'');
    let path = expand_home(trimmed);

    let absolute = path
        .canonicalize()
        .map_err(|e| format!("Cannot open {}: {}", path.display(), e))?;
    if !absolute.is_file() {
        return Err(format!("{} is not a file", absolute.display()));
    }

    let is_image = mime_guess::from_path(&absolute)
        .first()
        .is_some_and(|mime| mime.type_() == mime_guess::mime::IMAGE);
    if !is_image {
        return Err(format!("{} is not an image", absolute.display()));
    }

    let url = Url::from_file_path(&absolute)
        .map_err(|()| format!("{} cannot be expressed as a file URL", absolute.display()))?;
    Ok(Locator::new(url.as_str()))
}

fn expand_home(input: &str) -> PathBuf {
    match input.strip_prefix("~/") {
        Some(rest) => std::env::var_os("HOME")
            .map(|home| Path::new(&home).join(rest))
            .unwrap_or_else(|| PathBuf::from(input)),
        None => PathBuf::from(input),
    }
}
