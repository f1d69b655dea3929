//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types shared across Roster. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Identifier validation errors carry the rejected value.
//! - Configuration errors carry the offending path or field.
//! - Per-item failures inside the core (unparsable phone numbers, directory
//!   lookup failures, unresolved member names) are NOT represented here as
//!   hard errors. They are absorbed where they occur.

use std::path::PathBuf;

use thiserror::Error;

/// Validation errors for identifier newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A string identifier was empty or whitespace-only.
    #[error("invalid {kind}: must be non-empty")]
    EmptyIdentifier {
        /// Which identifier kind was rejected (e.g. "member id").
        kind: &'static str,
    },

    /// A hex-encoded value could not be decoded.
    #[error("invalid hex for {kind}: \"{value}\"")]
    InvalidHex {
        /// Which identifier kind was rejected.
        kind: &'static str,
        /// The string that failed to decode.
        value: String,
    },

    /// A hex-encoded digest has the wrong length.
    #[error("invalid digest length: expected 32 bytes, got {0}")]
    DigestLength(usize),
}

/// Errors while loading or validating [`crate::RosterConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path of the file that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for the config schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A configuration value is out of range or malformed.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
