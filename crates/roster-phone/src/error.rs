//! Phone normalization errors.

use thiserror::Error;

/// Errors produced while normalizing phone text or resolving a region.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The text does not describe a dialable number. Non-fatal: the entry is
    /// skipped by the contact layer.
    #[error("unparsable phone number {input:?}: {reason}")]
    Unparsable {
        /// The raw text as supplied.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The region code is not known to the phone metadata.
    #[error("unknown region code {0:?}")]
    UnknownRegion(String),
}
