//! # Region Context
//!
//! A number written without a country calling code ("(415) 555-0123") only
//! means something relative to a region. The preferred region is the one the
//! account's own number belongs to; the configured default is the fallback.

use std::fmt;

use phonenumber::country;
use roster_core::RosterConfig;

use crate::error::PhoneError;

/// An ISO 3166-1 alpha-2 region known to the phone metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    id: country::Id,
    code: String,
}

impl Region {
    /// Parse a two-letter region code, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::UnknownRegion`] if the phone metadata has no
    /// entry for the code.
    pub fn parse(code: &str) -> Result<Self, PhoneError> {
        let code = code.trim().to_ascii_uppercase();
        let id = code
            .parse::<country::Id>()
            .map_err(|_| PhoneError::UnknownRegion(code.clone()))?;
        Ok(Self { id, code })
    }

    /// Infer the region of an E.164 number, e.g. the account's local number.
    ///
    /// Returns `None` when the number does not parse or its calling code is
    /// shared by regions the metadata cannot tell apart.
    pub fn from_local_number(e164: &str) -> Option<Self> {
        let parsed = phonenumber::parse(None, e164.trim()).ok()?;
        let id = parsed.country().id()?;
        let code = format!("{id:?}");
        Some(Self { id, code })
    }

    /// Resolve the effective region for a configuration: the local number's
    /// region if it can be inferred, otherwise `default_region`.
    pub fn from_config(config: &RosterConfig) -> Result<Self, PhoneError> {
        if let Some(local) = config.local_number.as_deref() {
            match Self::from_local_number(local) {
                Some(region) => return Ok(region),
                None => tracing::warn!(
                    local_number = local,
                    default_region = %config.default_region,
                    "could not infer region from local number, using default region"
                ),
            }
        }
        Self::parse(&config.default_region)
    }

    /// The uppercase two-letter code.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub(crate) fn country_id(&self) -> country::Id {
        self.id
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
