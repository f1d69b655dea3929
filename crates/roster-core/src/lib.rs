//! # roster-core: Foundational Types for Roster
//!
//! This crate is the leaf of the Roster workspace. It defines the identifier
//! newtypes shared by contact resolution and group change detection, the
//! validation and configuration errors, and the runtime configuration.
//! Every other crate in the workspace depends on `roster-core`; it depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `ContactId`, `MemberId`,
//!    `NetworkId`, `GroupId` are distinct types with validated constructors.
//!    A member id cannot be passed where a contact id is expected.
//!
//! 2. **Immutable values.** Nothing in this crate exposes interior
//!    mutability. An "update" is always a new value.
//!
//! 3. **Degrade, don't abort.** Per-item failures (an unparsable number, a
//!    failed directory lookup, an unknown member name) are absorbed by the
//!    crate that encounters them. Only configuration and I/O errors surface
//!    as hard errors.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `roster-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod identity;
pub mod names;

// Re-export primary types for ergonomic imports.
pub use config::{AvatarComparison, NameOrdering, RosterConfig};
pub use error::{ConfigError, ValidationError};
pub use identity::{AvatarDigest, ContactId, GroupId, MemberId, NetworkId};
pub use names::{NameResolver, RawIds};
