//! # roster-contacts: Contact Identity Resolution
//!
//! Normalizes raw address-book records into [`ContactIdentity`] values and
//! matches them against a directory of known network identities.
//!
//! ## Pipeline
//!
//! ```text
//! RawContactRecord ──► ContactIdentity ──► DirectoryResolver ──► ResolvedIdentity
//!                        (normalizer)        (DirectoryLookup)        │
//!                                                                     ▼
//!                                                               ContactBook
//!                                                        (NameResolver for groups)
//! ```
//!
//! ## Failure Model
//!
//! Nothing in this crate fails a whole batch. Unparsable numbers are dropped
//! when the identity is built; a failed directory lookup contributes no
//! match for that number; a crashed batch worker yields an unmatched result
//! for its contact only.

pub mod book;
pub mod directory;
pub mod identity;
pub mod record;

pub use book::ContactBook;
pub use directory::{
    DirectoryError, DirectoryLookup, DirectoryResolver, InMemoryDirectory, ResolvedIdentity,
};
pub use identity::{sort_comparator, sort_contacts, ContactIdentity};
pub use record::RawContactRecord;
