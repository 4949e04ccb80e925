//! Error types for the suggestion helper.

use std::io;
use thiserror::Error;

/// Errors surfaced by the dispatcher.
#[derive(Debug, Error)]
pub enum Error {
    /// The external command could not be started at all.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The external command ran but exited unsuccessfully.
    #[error("`{program}` exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The mode argument did not name a known mode.
    #[error("unknown mode: {0}")]
    InvalidMode(String),

    /// Reading the prompt from standard input failed.
    #[error("failed to read prompt from stdin: {0}")]
    Stdin(#[source] io::Error),
}

impl Error {
    /// The text to show the user for an external command failure.
    ///
    /// For a failed command this is the command's own stderr, passed through
    /// as-is; everything else falls back to the `Display` form.
    pub fn diagnostic(&self) -> String {
        match self {
            Error::CommandFailed { stderr, .. } => stderr.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
