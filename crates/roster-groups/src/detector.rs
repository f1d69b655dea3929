//! # Group Change Detector
//!
//! Diffs an optional previous snapshot against the current one.
//!
//! ## Rules
//!
//! 1. No previous snapshot: exactly one [`ChangeEvent::Created`].
//! 2. Title changed (absent reads as `""`): one title event.
//! 3. Avatar changed: one avatar event. By default only presence counts;
//!    [`AvatarComparison::Content`] also compares digests.
//! 4. Joined members (`new - old`), then departed members (`old - new`),
//!    each sorted by display name and then raw id.
//! 5. Nothing above but the snapshots still differ: one
//!    [`ChangeEvent::Updated`].
//!
//! An empty result means there is nothing to display.

use roster_core::{AvatarComparison, MemberId, NameResolver, RawIds, RosterConfig};

use crate::event::ChangeEvent;
use crate::info::{GroupMetaMessage, GroupUpdateInfo};
use crate::snapshot::GroupSnapshot;

/// Computes the displayed changes between group snapshots.
///
/// Stateless apart from its options; a single detector can serve any number
/// of groups.
#[derive(Debug, Clone, Default)]
pub struct GroupChangeDetector {
    avatar_comparison: AvatarComparison,
    local_member: Option<MemberId>,
}

impl GroupChangeDetector {
    pub fn new(avatar_comparison: AvatarComparison) -> Self {
        Self {
            avatar_comparison,
            local_member: None,
        }
    }

    pub fn from_config(config: &RosterConfig) -> Self {
        Self::new(config.avatar_comparison)
    }

    /// Identify the local account's member id, so that its own arrival
    /// renders as "You joined the group." and its departure classifies the
    /// transition as [`GroupMetaMessage::Quit`].
    pub fn with_local_member(mut self, member: MemberId) -> Self {
        self.local_member = Some(member);
        self
    }

    pub fn avatar_comparison(&self) -> AvatarComparison {
        self.avatar_comparison
    }

    /// Detect the changes from `old` to `new`.
    ///
    /// `names` only orders the member events; ids are carried raw.
    pub fn detect<R: NameResolver + ?Sized>(
        &self,
        old: Option<&GroupSnapshot>,
        new: &GroupSnapshot,
        names: &R,
    ) -> Vec<ChangeEvent> {
        let Some(old) = old else {
            return vec![ChangeEvent::Created];
        };

        if old.group_id() != new.group_id() {
            tracing::warn!(
                old_group = %old.group_id(),
                new_group = %new.group_id(),
                "diffing snapshots of different groups"
            );
        }

        let mut events = Vec::new();

        if old.title() != new.title() {
            events.push(ChangeEvent::NameChanged {
                from: old.title().to_string(),
                to: new.title().to_string(),
            });
        }

        if self.avatar_changed(old, new) {
            events.push(ChangeEvent::AvatarChanged);
        }

        let joined = sorted_by_name(new.member_ids().difference(old.member_ids()), names);
        let (own, others): (Vec<_>, Vec<_>) = joined
            .into_iter()
            .partition(|id| self.local_member.as_ref() == Some(id));
        events.extend(own.into_iter().map(|member_id| ChangeEvent::BecameMember { member_id }));
        events.extend(others.into_iter().map(|member_id| ChangeEvent::MemberJoined { member_id }));

        let left = sorted_by_name(old.member_ids().difference(new.member_ids()), names);
        events.extend(left.into_iter().map(|member_id| ChangeEvent::MemberLeft { member_id }));

        if events.is_empty() && old != new {
            events.push(ChangeEvent::Updated);
        }

        tracing::debug!(group = %new.group_id(), events = events.len(), "group diff computed");
        events
    }

    /// Render events to English descriptions, one per event.
    pub fn render<R: NameResolver + ?Sized>(&self, events: &[ChangeEvent], names: &R) -> Vec<String> {
        events.iter().map(|e| e.describe(names)).collect()
    }

    /// Detect and render in one step.
    pub fn describe_change<R: NameResolver + ?Sized>(
        &self,
        old: Option<&GroupSnapshot>,
        new: &GroupSnapshot,
        names: &R,
    ) -> Vec<String> {
        let events = self.detect(old, new, names);
        self.render(&events, names)
    }

    /// Structured diff, or `None` for a first snapshot.
    pub fn update_info<R: NameResolver + ?Sized>(
        &self,
        old: Option<&GroupSnapshot>,
        new: &GroupSnapshot,
        names: &R,
    ) -> Option<GroupUpdateInfo> {
        GroupUpdateInfo::from_events(&self.detect(old, new, names))
    }

    /// Classify the transition from `old` to `new`.
    pub fn meta_message(&self, old: Option<&GroupSnapshot>, new: &GroupSnapshot) -> GroupMetaMessage {
        let Some(previous) = old else {
            return GroupMetaMessage::New;
        };
        if let Some(me) = &self.local_member {
            if previous.is_member(me) && !new.is_member(me) {
                return GroupMetaMessage::Quit;
            }
        }
        if self.detect(old, new, &RawIds).is_empty() {
            GroupMetaMessage::Unspecified
        } else {
            GroupMetaMessage::Update
        }
    }

    fn avatar_changed(&self, old: &GroupSnapshot, new: &GroupSnapshot) -> bool {
        match (old.avatar(), new.avatar()) {
            (None, None) => false,
            (Some(a), Some(b)) => {
                self.avatar_comparison == AvatarComparison::Content && a != b
            }
            _ => true,
        }
    }
}

/// Order member ids by (display name, raw id).
fn sorted_by_name<'a, R: NameResolver + ?Sized>(
    ids: impl Iterator<Item = &'a MemberId>,
    names: &R,
) -> Vec<MemberId> {
    let mut keyed: Vec<(String, &MemberId)> =
        ids.map(|id| (names.display_name_or_id(id), id)).collect();
    keyed.sort();
    keyed.into_iter().map(|(_, id)| id.clone()).collect()
}
