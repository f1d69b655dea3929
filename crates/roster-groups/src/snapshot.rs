//! Group state at one point in time.

use std::collections::BTreeSet;

use roster_core::{AvatarDigest, GroupId, MemberId};
use serde::{Deserialize, Serialize};

/// An immutable snapshot of a group's title, membership and avatar.
///
/// Equality compares the group id, title, member set and avatar
/// *presence*. Two snapshots whose avatars differ only in content are
/// equal; content comparison is a detector option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSnapshot {
    group_id: GroupId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group_name: Option<String>,
    #[serde(default)]
    member_ids: BTreeSet<MemberId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar: Option<AvatarDigest>,
}

impl GroupSnapshot {
    /// Build a snapshot. Duplicate member ids collapse.
    pub fn new(
        group_name: Option<String>,
        member_ids: impl IntoIterator<Item = MemberId>,
        group_id: GroupId,
        avatar: Option<AvatarDigest>,
    ) -> Self {
        Self {
            group_id,
            group_name,
            member_ids: member_ids.into_iter().collect(),
            avatar,
        }
    }

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn group_name(&self) -> Option<&str> {
        self.group_name.as_deref()
    }

    /// The title with an absent title read as `""`.
    pub fn title(&self) -> &str {
        self.group_name.as_deref().unwrap_or("")
    }

    pub fn member_ids(&self) -> &BTreeSet<MemberId> {
        &self.member_ids
    }

    pub fn is_member(&self, member: &MemberId) -> bool {
        self.member_ids.contains(member)
    }

    pub fn avatar(&self) -> Option<&AvatarDigest> {
        self.avatar.as_ref()
    }

    pub fn has_avatar(&self) -> bool {
        self.avatar.is_some()
    }

    /// A copy with a different title.
    pub fn with_name(&self, group_name: Option<String>) -> Self {
        Self {
            group_name,
            ..self.clone()
        }
    }

    /// A copy with a different member set.
    pub fn with_members(&self, member_ids: impl IntoIterator<Item = MemberId>) -> Self {
        Self {
            member_ids: member_ids.into_iter().collect(),
            ..self.clone()
        }
    }

    /// A copy with a different avatar.
    pub fn with_avatar(&self, avatar: Option<AvatarDigest>) -> Self {
        Self {
            avatar,
            ..self.clone()
        }
    }
}

impl PartialEq for GroupSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.group_id == other.group_id
            && self.group_name == other.group_name
            && self.member_ids == other.member_ids
            && self.has_avatar() == other.has_avatar()
    }
}

impl Eq for GroupSnapshot {}
