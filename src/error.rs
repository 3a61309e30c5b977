//! # Error Handling
//!
//! This module defines the error type shared by every stage of the update
//! pipeline. It uses `thiserror` to derive `Display` for each variant so that
//! the CLI can print a readable diagnostic without further formatting.
//!
//! The variants fall into three groups:
//!
//! - **Run-aborting**: `VcsCommand` and `RevisionNotFound` are raised by the
//!   subversion collaborator and stop the run before any file is touched.
//! - **Per-file**: `Transfer` describes a failed copy or transformation of a
//!   single path. The orchestrator logs it and moves on to the next path.
//! - **Setup**: `Config` and `State` cover invalid configuration and an
//!   unreadable or inconsistent `update.rev` file.

use thiserror::Error;

/// Main error type for mini-weka update operations
#[derive(Error, Debug)]
pub enum Error {
    /// An svn command could not be spawned or exited with a non-zero status.
    #[error("svn command failed: {command}\n{stderr}")]
    VcsCommand { command: String, stderr: String },

    /// `svn info` did not print a usable `Revision:` line.
    #[error("Failed to determine HEAD revision from svn info output:\n{output}")]
    RevisionNotFound { output: String },

    /// The configuration is invalid.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The synchronization state file could not be read or written.
    #[error("State file error for {path}: {message}")]
    State { path: String, message: String },

    /// A single file could not be copied or transformed.
    #[error("Failed to copy {src} to {dst}: {message}")]
    Transfer {
        src: String,
        dst: String,
        message: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
