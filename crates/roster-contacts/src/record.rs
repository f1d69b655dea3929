//! Raw contact records, the input shape handed over by a platform adapter.

use roster_core::ContactId;
use serde::{Deserialize, Serialize};

/// A device address-book entry as supplied by the platform adapter.
///
/// Fields are taken verbatim; nothing is normalized here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContactRecord {
    /// Stable identifier of the source record.
    pub unique_id: ContactId,
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Phone numbers exactly as the user typed them.
    #[serde(default)]
    pub phone_numbers: Vec<String>,
    /// Email addresses.
    #[serde(default)]
    pub emails: Vec<String>,
}

impl RawContactRecord {
    /// An empty record for `unique_id`.
    pub fn new(unique_id: ContactId) -> Self {
        Self {
            unique_id,
            first_name: None,
            last_name: None,
            phone_numbers: Vec::new(),
            emails: Vec::new(),
        }
    }

    /// Set both name parts.
    pub fn with_name(mut self, first: Option<&str>, last: Option<&str>) -> Self {
        self.first_name = first.map(str::to_string);
        self.last_name = last.map(str::to_string);
        self
    }

    /// Append a phone number.
    pub fn with_phone(mut self, text: impl Into<String>) -> Self {
        self.phone_numbers.push(text.into());
        self
    }

    /// Append an email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.emails.push(email.into());
        self
    }
}
