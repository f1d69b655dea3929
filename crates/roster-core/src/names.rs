//! # Member Name Resolution
//!
//! The seam between contact resolution and group change detection. The
//! group detector renders member ids through a [`NameResolver`]; the contact
//! book built from directory resolution is the production implementation.
//!
//! Resolution never fails from the caller's point of view: an unknown id,
//! or a blank name, falls back to the raw member id.

use crate::identity::MemberId;

/// Maps a member id to a human-readable display name.
pub trait NameResolver {
    /// The display name for `member`, or `None` if the member is unknown.
    fn display_name(&self, member: &MemberId) -> Option<String>;

    /// The display name for `member`, falling back to the raw id.
    fn display_name_or_id(&self, member: &MemberId) -> String {
        match self.display_name(member) {
            Some(name) if !name.trim().is_empty() => name,
            _ => member.as_str().to_string(),
        }
    }
}

impl<F> NameResolver for F
where
    F: Fn(&MemberId) -> Option<String>,
{
    fn display_name(&self, member: &MemberId) -> Option<String> {
        self(member)
    }
}

/// Resolver that knows no names; every member renders as its raw id.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawIds;

impl NameResolver for RawIds {
    fn display_name(&self, _member: &MemberId) -> Option<String> {
        None
    }
}
