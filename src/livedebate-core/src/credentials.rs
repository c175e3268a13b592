//! Service-account credential resolution for the speech backend.
//!
//! The backend authenticates through a credential file path. Deployments
//! that can only hand over an inline JSON blob get it staged into a
//! private temp file; a path that is already set always wins and the
//! inline blob is ignored entirely.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::DebateError;

pub const CREDENTIALS_PATH_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const CREDENTIALS_JSON_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS_JSON";

/// Where the credential file came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCredentials {
    /// Caller-supplied path, used as-is.
    Path(PathBuf),
    /// Inline JSON staged into a temp file for this process.
    Staged(PathBuf),
}

impl ResolvedCredentials {
    pub fn path(&self) -> &Path {
        match self {
            ResolvedCredentials::Path(p) | ResolvedCredentials::Staged(p) => p,
        }
    }
}

/// Resolve credential material without touching process state.
///
/// A preset `path` wins outright. Otherwise `inline_json` is parsed,
/// reserialized, and written to a fresh private temp file. Returns
/// `None` when neither source is present; empty strings count as absent.
pub fn resolve(
    path: Option<&str>,
    inline_json: Option<&str>,
) -> Result<Option<ResolvedCredentials>, DebateError> {
    if let Some(p) = path.filter(|p| !p.is_empty()) {
        return Ok(Some(ResolvedCredentials::Path(PathBuf::from(p))));
    }
    let Some(blob) = inline_json.filter(|b| !b.is_empty()) else {
        return Ok(None);
    };

    let data: serde_json::Value = serde_json::from_str(blob)
        .map_err(|e| DebateError::Credential(format!("Invalid inline credential JSON: {e}")))?;

    let mut file = tempfile::Builder::new()
        .prefix("gcp_sa_")
        .suffix(".json")
        .tempfile()
        .map_err(|e| DebateError::Credential(format!("Failed to create credential file: {e}")))?;
    serde_json::to_writer(file.as_file_mut(), &data)
        .map_err(|e| DebateError::Credential(format!("Failed to write credential file: {e}")))?;

    // The staged file must stay on disk for the rest of the process.
    let (_file, staged_path) = file
        .keep()
        .map_err(|e| DebateError::Credential(format!("Failed to persist credential file: {e}")))?;

    Ok(Some(ResolvedCredentials::Staged(staged_path)))
}

/// Stage credentials from the environment, setting the path variable at
/// most once per process.
///
/// Idempotent: once the path variable is set (by the caller or by a
/// previous invocation) later calls return it untouched. Fails silently
/// on any parse or I/O error, leaving the environment as it was.
pub fn ensure_from_env() -> Option<PathBuf> {
    if let Ok(preset) = env::var(CREDENTIALS_PATH_VAR)
        && !preset.is_empty()
    {
        return Some(PathBuf::from(preset));
    }

    let blob = env::var(CREDENTIALS_JSON_VAR).ok()?;
    match resolve(None, Some(&blob)) {
        Ok(Some(resolved)) => {
            let staged = resolved.path().to_path_buf();
            // Later calls now take the preset-path branch above.
            unsafe { env::set_var(CREDENTIALS_PATH_VAR, &staged) };
            Some(staged)
        }
        Ok(None) => None,
        Err(e) => {
            tracing::debug!(error = %e, "credential staging failed");
            None
        }
    }
}
