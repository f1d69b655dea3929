//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the identifiers that flow through contact
//! resolution and group change detection. Each identifier is a distinct
//! type: a [`MemberId`] cannot be passed where a [`ContactId`] is expected.
//!
//! ## Validation
//!
//! String identifiers ([`ContactId`], [`MemberId`], [`NetworkId`]) are
//! trimmed and must be non-empty. Byte identifiers ([`GroupId`],
//! [`AvatarDigest`]) serialize as lowercase hex and validate on decode.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ValidationError;

/// Implements `Deserialize` for string newtypes by routing the raw string
/// through the type's validating `new()` constructor, so that invalid values
/// are rejected at deserialization time.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Constructor, accessor and `Display` for trimmed, non-empty string ids.
macro_rules! string_identifier {
    ($ty:ident, $kind:literal) => {
        impl $ty {
            #[doc = concat!("Create a ", $kind, ", trimming surrounding whitespace.")]
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::EmptyIdentifier`] if the value is
            /// empty or whitespace-only.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let raw = value.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::EmptyIdentifier { kind: $kind });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Access the identifier string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl_validating_deserialize!($ty);
    };
}

// ---------------------------------------------------------------------------
// String identifiers
// ---------------------------------------------------------------------------

/// Stable identifier of a contact's source record (the address-book entry).
///
/// Stable for the life of the underlying record. Used as the tie-breaker
/// of the contact sort order, so it is totally ordered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ContactId(String);

string_identifier!(ContactId, "contact id");

/// Identifier of a group member.
///
/// Membership identity is per member id, never per display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MemberId(String);

string_identifier!(MemberId, "member id");

/// Opaque identity returned by the directory when a phone number belongs
/// to a known user of the messaging network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NetworkId(String);

string_identifier!(NetworkId, "network id");

impl From<NetworkId> for MemberId {
    /// Group members are addressed by their network identity.
    fn from(id: NetworkId) -> Self {
        Self(id.0)
    }
}

// ---------------------------------------------------------------------------
// Byte identifiers
// ---------------------------------------------------------------------------

/// Stable identity of a group, shared by every snapshot of that group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(Vec<u8>);

impl GroupId {
    /// Create a group identifier from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyIdentifier`] for an empty byte string.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, ValidationError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ValidationError::EmptyIdentifier { kind: "group id" });
        }
        Ok(Self(bytes))
    }

    /// Decode a group identifier from lowercase or uppercase hex.
    pub fn from_hex(s: &str) -> Result<Self, ValidationError> {
        Self::new(decode_hex(s, "group id")?)
    }

    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Render the identifier as lowercase hex.
    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group:{}", self.to_hex())
    }
}

impl Serialize for GroupId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for GroupId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// SHA-256 digest of a group avatar's bytes.
///
/// Lets the change detector compare avatar content without holding image
/// data. The image itself never enters this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AvatarDigest([u8; 32]);

impl AvatarDigest {
    /// Compute the digest of raw avatar bytes.
    pub fn of(image_bytes: &[u8]) -> Self {
        let hash = Sha256::digest(image_bytes);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    /// Decode a digest from 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, ValidationError> {
        let decoded = decode_hex(s, "avatar digest")?;
        let bytes: [u8; 32] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| ValidationError::DigestLength(decoded.len()))?;
        Ok(Self(bytes))
    }

    /// Access the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the digest as lowercase hex.
    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }
}

impl fmt::Display for AvatarDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

impl Serialize for AvatarDigest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AvatarDigest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn decode_hex(s: &str, kind: &'static str) -> Result<Vec<u8>, ValidationError> {
    let invalid = || ValidationError::InvalidHex {
        kind,
        value: s.to_string(),
    };
    if s.len() % 2 != 0 || !s.is_ascii() {
        return Err(invalid());
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| invalid()))
        .collect()
}
