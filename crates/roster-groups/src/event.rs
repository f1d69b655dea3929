//! # Change Events
//!
//! The structured result of diffing two snapshots. Rendering to text is a
//! separate step so callers can localize or restructure the output.

use roster_core::{MemberId, NameResolver};
use serde::Serialize;

/// One displayed change between two group snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeEvent {
    /// First snapshot of the group.
    Created,
    /// Title changed. An absent title is `""`.
    NameChanged { from: String, to: String },
    AvatarChanged,
    MemberJoined { member_id: MemberId },
    /// The local member is among the joined ids.
    BecameMember { member_id: MemberId },
    MemberLeft { member_id: MemberId },
    /// The snapshots differ but in nothing the other events describe.
    Updated,
}

impl ChangeEvent {
    /// English description, with member ids rendered through `names`.
    pub fn describe<R: NameResolver + ?Sized>(&self, names: &R) -> String {
        match self {
            Self::Created => "Group created.".to_string(),
            Self::NameChanged { from, to } => {
                format!("Title changed from \"{from}\" to \"{to}\".")
            }
            Self::AvatarChanged => "Avatar changed.".to_string(),
            Self::MemberJoined { member_id } => {
                format!("{} joined the group.", names.display_name_or_id(member_id))
            }
            Self::BecameMember { .. } => "You joined the group.".to_string(),
            Self::MemberLeft { member_id } => {
                format!("{} left the group.", names.display_name_or_id(member_id))
            }
            Self::Updated => "Group updated.".to_string(),
        }
    }

    /// Whether this event concerns membership.
    pub fn is_membership(&self) -> bool {
        matches!(
            self,
            Self::MemberJoined { .. } | Self::BecameMember { .. } | Self::MemberLeft { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::RawIds;

    fn id(s: &str) -> MemberId {
        MemberId::new(s).unwrap()
    }

    #[test]
    fn fixed_strings() {
        assert_eq!(ChangeEvent::Created.describe(&RawIds), "Group created.");
        assert_eq!(ChangeEvent::AvatarChanged.describe(&RawIds), "Avatar changed.");
        assert_eq!(ChangeEvent::Updated.describe(&RawIds), "Group updated.");
        assert_eq!(
            ChangeEvent::BecameMember { member_id: id("me") }.describe(&RawIds),
            "You joined the group."
        );
    }

    #[test]
    fn title_change_quotes_both_sides() {
        let e = ChangeEvent::NameChanged {
            from: String::new(),
            to: "Team".into(),
        };
        assert_eq!(e.describe(&RawIds), "Title changed from \"\" to \"Team\".");
    }

    #[test]
    fn member_lines_use_resolved_names() {
        let names = |m: &MemberId| (m.as_str() == "u3").then(|| "Carol".to_string());
        let joined = ChangeEvent::MemberJoined { member_id: id("u3") };
        let left = ChangeEvent::MemberLeft { member_id: id("u2") };
        assert_eq!(joined.describe(&names), "Carol joined the group.");
        assert_eq!(left.describe(&names), "u2 left the group.");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(ChangeEvent::MemberLeft { member_id: id("u2") }).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "member_left", "member_id": "u2"}));
        let json = serde_json::to_value(ChangeEvent::Created).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "created"}));
    }
}
