//! # Contact Identity
//!
//! An immutable, normalized view of one address-book record. All derived
//! fields (full name, comparable names, canonical phone numbers) are computed
//! once at construction; there are no setters.
//!
//! ## Sort Order
//!
//! Contact lists are re-sorted on every refresh. The comparator is a total
//! order: comparable name first, then `unique_id`, so equal names never
//! reshuffle between refreshes regardless of input order.

use std::cmp::Ordering;

use roster_core::{ContactId, NameOrdering};
use roster_phone::{PhoneNumber, PhoneNumberNormalizer};
use serde::Serialize;

use crate::record::RawContactRecord;

/// A contact with normalized phone numbers and precomputed sort keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactIdentity {
    unique_id: ContactId,
    first_name: Option<String>,
    last_name: Option<String>,
    full_name: String,
    comparable_name_first_last: String,
    comparable_name_last_first: String,
    raw_phone_numbers: Vec<String>,
    normalized_phone_numbers: Vec<PhoneNumber>,
    emails: Vec<String>,
}

impl ContactIdentity {
    /// Build an identity from a raw record.
    ///
    /// Blank name parts are treated as absent. Phone entries the normalizer
    /// rejects are dropped, so `normalized_phone_numbers().len()` never
    /// exceeds `raw_phone_numbers().len()`.
    pub fn from_record(record: RawContactRecord, normalizer: &PhoneNumberNormalizer) -> Self {
        let first_name = non_blank(record.first_name);
        let last_name = non_blank(record.last_name);
        let normalized_phone_numbers = normalizer.normalize_all(&record.phone_numbers);

        let full_name = compose_full_name(
            first_name.as_deref(),
            last_name.as_deref(),
            &record.phone_numbers,
            &record.emails,
        );

        let has_name = first_name.is_some() || last_name.is_some();
        let (comparable_name_first_last, comparable_name_last_first) = if has_name {
            (
                comparable(first_name.as_deref(), last_name.as_deref()),
                comparable(last_name.as_deref(), first_name.as_deref()),
            )
        } else {
            // Nameless contacts sort by their fallback text in both orderings.
            let key = comparable(Some(full_name.as_str()), None);
            (key.clone(), key)
        };

        Self {
            unique_id: record.unique_id,
            first_name,
            last_name,
            full_name,
            comparable_name_first_last,
            comparable_name_last_first,
            raw_phone_numbers: record.phone_numbers,
            normalized_phone_numbers,
            emails: record.emails,
        }
    }

    /// Build an identity from its parts without an intermediate record.
    pub fn new(
        unique_id: ContactId,
        first_name: Option<String>,
        last_name: Option<String>,
        phone_numbers: Vec<String>,
        emails: Vec<String>,
        normalizer: &PhoneNumberNormalizer,
    ) -> Self {
        let record = RawContactRecord {
            unique_id,
            first_name,
            last_name,
            phone_numbers,
            emails,
        };
        Self::from_record(record, normalizer)
    }

    /// Stable identifier of the source record.
    pub fn unique_id(&self) -> &ContactId {
        &self.unique_id
    }

    /// Given name, if present and non-blank.
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Family name, if present and non-blank.
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// "First Last", or the first phone/email text when both parts are absent.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Lower-cased, whitespace-normalized "first last" sort key.
    pub fn comparable_name_first_last(&self) -> &str {
        &self.comparable_name_first_last
    }

    /// Lower-cased, whitespace-normalized "last first" sort key.
    pub fn comparable_name_last_first(&self) -> &str {
        &self.comparable_name_last_first
    }

    /// The sort key for `ordering`.
    pub fn comparable_name(&self, ordering: NameOrdering) -> &str {
        match ordering {
            NameOrdering::FirstLast => &self.comparable_name_first_last,
            NameOrdering::LastFirst => &self.comparable_name_last_first,
        }
    }

    /// Phone numbers as entered.
    pub fn raw_phone_numbers(&self) -> &[String] {
        &self.raw_phone_numbers
    }

    /// Canonical numbers, in raw-entry order, unparsable entries dropped.
    pub fn normalized_phone_numbers(&self) -> &[PhoneNumber] {
        &self.normalized_phone_numbers
    }

    /// Email addresses as entered.
    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    /// Whether `number` is one of this contact's canonical numbers.
    pub fn owns_number(&self, number: &PhoneNumber) -> bool {
        self.normalized_phone_numbers.contains(number)
    }

    /// The name to show for `number` if it belongs to this contact.
    pub fn display_name_for(&self, number: &PhoneNumber) -> Option<&str> {
        if self.owns_number(number) && !self.full_name.is_empty() {
            Some(&self.full_name)
        } else {
            None
        }
    }

    /// Total order for `ordering`: comparable name, then `unique_id`.
    pub fn compare(&self, other: &Self, ordering: NameOrdering) -> Ordering {
        self.comparable_name(ordering)
            .cmp(other.comparable_name(ordering))
            .then_with(|| self.unique_id.cmp(&other.unique_id))
    }
}

/// Comparator sorting by first-then-last (`true`) or last-then-first
/// (`false`), tie-broken by `unique_id`.
pub fn sort_comparator(
    first_name_ordering: bool,
) -> impl Fn(&ContactIdentity, &ContactIdentity) -> Ordering {
    let ordering = if first_name_ordering {
        NameOrdering::FirstLast
    } else {
        NameOrdering::LastFirst
    };
    move |a: &ContactIdentity, b: &ContactIdentity| a.compare(b, ordering)
}

/// Sort contacts in place. Idempotent, and independent of input order.
pub fn sort_contacts(contacts: &mut [ContactIdentity], ordering: NameOrdering) {
    contacts.sort_by(|a, b| a.compare(b, ordering));
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn compose_full_name(
    first: Option<&str>,
    last: Option<&str>,
    phones: &[String],
    emails: &[String],
) -> String {
    let joined = [first, last].into_iter().flatten().collect::<Vec<_>>().join(" ");
    if !joined.is_empty() {
        return joined;
    }
    phones
        .iter()
        .chain(emails)
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Lower-case `lead trail` and collapse whitespace runs to one space.
fn comparable(lead: Option<&str>, trail: Option<&str>) -> String {
    [lead, trail]
        .into_iter()
        .flatten()
        .flat_map(str::split_whitespace)
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
