//! Structured forms of a group transition.

use roster_core::MemberId;
use serde::{Deserialize, Serialize};

use crate::event::ChangeEvent;

/// A title change. An absent title is `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameChange {
    pub from: String,
    pub to: String,
}

/// Machine-readable diff between two snapshots of a group.
///
/// Carries the same information as the rendered descriptions, in the same
/// order. There is no update info for a group's first snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUpdateInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_changed: Option<NameChange>,
    #[serde(default)]
    pub avatar_changed: bool,
    #[serde(default)]
    pub joined: Vec<MemberId>,
    #[serde(default)]
    pub left: Vec<MemberId>,
}

impl GroupUpdateInfo {
    /// Collect update info from detected events.
    ///
    /// Returns `None` if the events describe a group's creation.
    pub fn from_events(events: &[ChangeEvent]) -> Option<Self> {
        let mut info = Self::default();
        for event in events {
            match event {
                ChangeEvent::Created => return None,
                ChangeEvent::NameChanged { from, to } => {
                    info.name_changed = Some(NameChange {
                        from: from.clone(),
                        to: to.clone(),
                    });
                }
                ChangeEvent::AvatarChanged => info.avatar_changed = true,
                ChangeEvent::MemberJoined { member_id }
                | ChangeEvent::BecameMember { member_id } => info.joined.push(member_id.clone()),
                ChangeEvent::MemberLeft { member_id } => info.left.push(member_id.clone()),
                ChangeEvent::Updated => {}
            }
        }
        Some(info)
    }

    /// True when nothing in the structured diff changed.
    pub fn is_empty(&self) -> bool {
        self.name_changed.is_none()
            && !self.avatar_changed
            && self.joined.is_empty()
            && self.left.is_empty()
    }
}

/// Coarse classification of a group transition, for the message that
/// carries it in a conversation timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupMetaMessage {
    /// First snapshot of the group.
    New,
    /// The local member left.
    Quit,
    /// Some other displayed change.
    Update,
    /// No displayed change.
    Unspecified,
}
