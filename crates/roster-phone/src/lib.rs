//! # roster-phone: Phone Number Normalization
//!
//! Turns free-form phone text, as typed into an address book, into a
//! canonical [`PhoneNumber`] in E.164 form. The canonical form is the
//! lookup key for directory resolution, so normalization must be
//! deterministic: the same text and region always yield the same number.
//!
//! Malformed input never panics and never aborts a batch. The normalizer
//! reports [`PhoneError::Unparsable`] and callers drop the entry.
//!
//! Country metadata comes from the `phonenumber` crate (a port of
//! libphonenumber).

pub mod error;
pub mod normalizer;
pub mod region;

pub use error::PhoneError;
pub use normalizer::{PhoneNumber, PhoneNumberNormalizer};
pub use region::Region;
