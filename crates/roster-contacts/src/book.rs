//! # Contact Book
//!
//! Index from network identity to contact display name, built from a
//! resolved batch. Group change descriptions render members through it.

use std::collections::HashMap;

use roster_core::{MemberId, NameOrdering, NameResolver, NetworkId};

use crate::directory::ResolvedIdentity;
use crate::identity::{sort_contacts, ContactIdentity};

/// Display names of known network identities.
#[derive(Debug, Clone, Default)]
pub struct ContactBook {
    names: HashMap<String, String>,
}

impl ContactBook {
    /// Build the index from contacts and their resolution results.
    ///
    /// Results are paired with contacts by contact id. When two contacts
    /// match the same network identity, the one that sorts first under
    /// `ordering` names it. Contacts with an empty full name are skipped.
    pub fn build(
        contacts: &[ContactIdentity],
        resolved: &[ResolvedIdentity],
        ordering: NameOrdering,
    ) -> Self {
        let matches: HashMap<_, _> = resolved
            .iter()
            .map(|r| (r.contact_id(), r.matched_network_ids()))
            .collect();

        let mut sorted = contacts.to_vec();
        sort_contacts(&mut sorted, ordering);

        let mut names = HashMap::new();
        for contact in &sorted {
            if contact.full_name().is_empty() {
                continue;
            }
            let Some(ids) = matches.get(contact.unique_id()) else {
                continue;
            };
            for id in ids.iter() {
                names
                    .entry(id.as_str().to_string())
                    .or_insert_with(|| contact.full_name().to_string());
            }
        }

        Self { names }
    }

    /// The display name for a network identity.
    pub fn name_for(&self, id: &NetworkId) -> Option<&str> {
        self.names.get(id.as_str()).map(String::as_str)
    }

    /// Number of named identities.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no identity has a name.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl NameResolver for ContactBook {
    fn display_name(&self, member: &MemberId) -> Option<String> {
        self.names.get(member.as_str()).cloned()
    }
}
