//! API key resolution.
//!
//! The first non-empty source wins: the `--api-key` flag, then
//! `RESEND_API_KEY`, then the trimmed contents of `~/.resend_api_key`.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use resend_api::ApiKey;
use thiserror::Error;

pub(crate) const API_KEY_ENV: &str = "RESEND_API_KEY";
pub(crate) const API_KEY_FILE: &str = ".resend_api_key";

/// Raised when none of the three sources yields a key.
#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "No API key found. Provide one via --api-key, RESEND_API_KEY env var, or ~/.resend_api_key file."
)]
pub(crate) struct MissingCredentialError;

/// Lower-priority credential sources captured from the process.
#[derive(Debug, Clone, Default)]
pub(crate) struct KeySources {
    pub(crate) env_key: Option<String>,
    pub(crate) key_file: Option<PathBuf>,
}

impl KeySources {
    /// Snapshot the environment variable and locate the home dotfile.
    pub(crate) fn from_process() -> Self {
        Self {
            env_key: env::var(API_KEY_ENV).ok(),
            key_file: BaseDirs::new().map(|dirs| dirs.home_dir().join(API_KEY_FILE)),
        }
    }

    /// Pick the key for this invocation.
    pub(crate) fn resolve(&self, explicit: Option<&str>) -> Result<ApiKey, MissingCredentialError> {
        if let Some(key) = explicit.filter(|value| !value.is_empty()) {
            tracing::debug!(source = "flag", "resolved API key");
            return Ok(ApiKey::new(key));
        }

        if let Some(key) = self.env_key.as_deref().filter(|value| !value.is_empty()) {
            tracing::debug!(source = "env", "resolved API key");
            return Ok(ApiKey::new(key));
        }

        if let Some(key) = self.read_key_file() {
            tracing::debug!(source = "file", "resolved API key");
            return Ok(ApiKey::new(key));
        }

        Err(MissingCredentialError)
    }

    fn read_key_file(&self) -> Option<String> {
        let path = self.key_file.as_ref()?;
        match fs::read_to_string(path) {
            Ok(contents) => {
                let trimmed = contents.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "API key file not readable");
                None
            }
        }
    }
}
