//! # roster-groups: Group Change Detection
//!
//! Compares two snapshots of the same group and produces the ordered list
//! of changes a conversation timeline shows.
//!
//! ## Flow
//!
//! ```text
//! old: Option<GroupSnapshot> ─┐
//!                             ├─► GroupChangeDetector::detect ─► Vec<ChangeEvent>
//! new: GroupSnapshot ─────────┘              │                        │
//!                                            │ NameResolver           ├─► render ─► Vec<String>
//!                                            ▼                        └─► GroupUpdateInfo
//!                                   member display names
//! ```
//!
//! ## Ordering
//!
//! Events always appear in the same category order: creation, title,
//! avatar, joined members, departed members. Within the member categories,
//! ids are sorted by display name and then raw id, so the same pair of
//! snapshots renders byte-identically every time.

pub mod detector;
pub mod event;
pub mod info;
pub mod snapshot;

pub use detector::GroupChangeDetector;
pub use event::ChangeEvent;
pub use info::{GroupMetaMessage, GroupUpdateInfo, NameChange};
pub use roster_core::{NameResolver, RawIds};
pub use snapshot::GroupSnapshot;
