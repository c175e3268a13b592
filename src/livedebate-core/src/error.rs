//! Error types for the debate voice system.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DebateError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-200 status; `message` carries the
    /// provider-supplied body text verbatim.
    #[error("{step} failed: {status} {message}")]
    RemoteRejection {
        step: &'static str,
        status: u16,
        message: String,
    },

    /// A 200 response whose body is missing an expected field or is not
    /// parseable at all.
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Credential error: {0}")]
    Credential(String),

    /// Speech synthesis failures are deliberately opaque; details only
    /// appear in debug-level traces.
    #[error("Speech synthesis failed")]
    Synthesis,

    #[error("Configuration error: {0}")]
    Config(String),
}
