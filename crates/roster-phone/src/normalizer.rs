//! # Phone Number Normalizer
//!
//! User-entered text goes to the `phonenumber` parser nearly verbatim. The
//! parser skips leading labels ("Fax:", "Mobile"), strips punctuation,
//! converts vanity letters to digits and splits off extensions (`x`, `ext`,
//! `#`), which never appear in the canonical form.
//!
//! Two rewrites happen first: surrounding whitespace is trimmed, and a
//! leading `00` international prefix becomes `+`, so "0044 20 ..." is read
//! as international in every region. Numbers written with `+` ignore the
//! region; all others take their calling code from it.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PhoneError;
use crate::region::Region;

/// A phone number in canonical E.164 form (`+<country code><national number>`).
///
/// Only [`PhoneNumberNormalizer`] constructs these from user text, so two
/// `PhoneNumber`s are equal exactly when they denote the same number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Wrap a string already in E.164 form.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::Unparsable`] unless the value is `+` followed
    /// by 1 to 15 ASCII digits.
    pub fn from_e164(value: impl Into<String>) -> Result<Self, PhoneError> {
        let value = value.into();
        let digits = value.strip_prefix('+').unwrap_or("");
        if digits.is_empty() || digits.len() > 15 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneError::Unparsable {
                input: value,
                reason: "not in E.164 form".to_string(),
            });
        }
        Ok(Self(value))
    }

    /// The E.164 string, e.g. `+14155550123`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_e164(raw).map_err(serde::de::Error::custom)
    }
}

/// Normalizes user-entered phone text relative to a region.
///
/// Pure and deterministic; holds only the region, so a single instance can
/// be shared across threads.
#[derive(Debug, Clone)]
pub struct PhoneNumberNormalizer {
    region: Region,
}

impl PhoneNumberNormalizer {
    /// Create a normalizer that interprets national numbers in `region`.
    pub fn new(region: Region) -> Self {
        Self { region }
    }

    /// The region national numbers are interpreted in.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Normalize `text` to E.164.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::Unparsable`] for blank text or text the phone
    /// metadata cannot parse, such as text with no digits.
    pub fn normalize(&self, text: &str) -> Result<PhoneNumber, PhoneError> {
        let unparsable = |reason: String| PhoneError::Unparsable {
            input: text.to_string(),
            reason,
        };

        let prepared = international_prefix(text).map_err(|r| unparsable(r.to_string()))?;
        let parsed = phonenumber::parse(Some(self.region.country_id()), &*prepared)
            .map_err(|e| unparsable(e.to_string()))?;
        let e164 = parsed.format().mode(phonenumber::Mode::E164).to_string();
        PhoneNumber::from_e164(e164).map_err(|_| unparsable("formatted number is not E.164".into()))
    }

    /// Normalize `text`, logging and discarding failures.
    pub fn try_normalize(&self, text: &str) -> Option<PhoneNumber> {
        match self.normalize(text) {
            Ok(number) => Some(number),
            Err(e) => {
                tracing::debug!(region = %self.region, "skipping phone entry: {e}");
                None
            }
        }
    }

    /// Normalize every entry in order, dropping the unparsable ones.
    ///
    /// The result never has more entries than the input.
    pub fn normalize_all<S: AsRef<str>>(&self, raw: &[S]) -> Vec<PhoneNumber> {
        raw.iter()
            .filter_map(|text| self.try_normalize(text.as_ref()))
            .collect()
    }
}

/// Trim `text` and rewrite a leading `00` international prefix to `+`.
fn international_prefix(text: &str) -> Result<Cow<'_, str>, &'static str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("empty input");
    }
    Ok(match trimmed.strip_prefix("00") {
        Some(rest) => Cow::Owned(format!("+{rest}")),
        None => Cow::Borrowed(trimmed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn us() -> PhoneNumberNormalizer {
        PhoneNumberNormalizer::new(Region::parse("US").unwrap())
    }

    fn gb() -> PhoneNumberNormalizer {
        PhoneNumberNormalizer::new(Region::parse("GB").unwrap())
    }

    // -- international_prefix ----------------------------------------------

    #[test]
    fn prefix_trims_and_keeps_text() {
        assert_eq!(international_prefix("  Fax: (415) 555-0123 ").unwrap(), "Fax: (415) 555-0123");
        assert_eq!(international_prefix("+1 415 555 0123").unwrap(), "+1 415 555 0123");
    }

    #[test]
    fn prefix_rewrites_double_zero() {
        assert_eq!(international_prefix("0044 20 7946 0018").unwrap(), "+44 20 7946 0018");
        assert_eq!(international_prefix(" 00 44 20").unwrap(), "+ 44 20");
    }

    #[test]
    fn prefix_rejects_blank_input() {
        assert_eq!(international_prefix(""), Err("empty input"));
        assert_eq!(international_prefix("   "), Err("empty input"));
    }

    // -- normalize -----------------------------------------------------------

    #[test]
    fn national_number_uses_region() {
        assert_eq!(us().normalize("(415) 555-0123").unwrap().as_str(), "+14155550123");
        assert_eq!(gb().normalize("020 7946 0018").unwrap().as_str(), "+442079460018");
    }

    #[test]
    fn international_number_ignores_region() {
        let a = us().normalize("+44 20 7946 0018").unwrap();
        let b = gb().normalize("+44 20 7946 0018").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "+442079460018");
    }

    #[test]
    fn double_zero_prefix_is_international() {
        assert_eq!(us().normalize("0044 20 7946 0018").unwrap().as_str(), "+442079460018");
    }

    #[test]
    fn equivalent_spellings_collapse() {
        let n = us();
        let forms = [
            "4155550123",
            "(415) 555-0123",
            "+1 415 555 0123",
            "415.555.0123 x7",
            "415-555-0123 ext. 89",
        ];
        let normalized: Vec<_> = forms.iter().map(|f| n.normalize(f).unwrap()).collect();
        assert!(normalized.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn unparsable_carries_input() {
        let err = us().normalize("call me").unwrap_err();
        match err {
            PhoneError::Unparsable { input, .. } => assert_eq!(input, "call me"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_input_is_unparsable() {
        assert_eq!(
            us().normalize("  "),
            Err(PhoneError::Unparsable {
                input: "  ".to_string(),
                reason: "empty input".to_string(),
            })
        );
    }

    #[test]
    fn labelled_entries_parse() {
        assert_eq!(us().normalize("Fax: (415) 555-0123").unwrap().as_str(), "+14155550123");
        assert_eq!(us().normalize("Mobile (415) 555-0123").unwrap().as_str(), "+14155550123");
        assert_eq!(
            us().normalize("Mobile: +44 20 7946 0018").unwrap().as_str(),
            "+442079460018"
        );
    }

    #[test]
    fn vanity_letters_become_digits() {
        assert_eq!(us().normalize("1-800-FLOWERS").unwrap().as_str(), "+18003569377");
    }

    #[test]
    fn try_normalize_swallows_failures() {
        assert!(us().try_normalize("").is_none());
        assert!(us().try_normalize("+1 415 555 0123").is_some());
    }

    #[test]
    fn normalize_all_preserves_order_and_drops_failures() {
        let raw = vec![
            "+44 20 7946 0018".to_string(),
            "nope".to_string(),
            "(415) 555-0123".to_string(),
        ];
        let out = us().normalize_all(&raw);
        let strs: Vec<_> = out.iter().map(PhoneNumber::as_str).collect();
        assert_eq!(strs, vec!["+442079460018", "+14155550123"]);
    }

    // -- PhoneNumber ---------------------------------------------------------

    #[test]
    fn from_e164_validates_shape() {
        assert!(PhoneNumber::from_e164("+14155550123").is_ok());
        assert!(PhoneNumber::from_e164("14155550123").is_err());
        assert!(PhoneNumber::from_e164("+").is_err());
        assert!(PhoneNumber::from_e164("+1415555012a").is_err());
        assert!(PhoneNumber::from_e164("+1234567890123456").is_err());
    }

    #[test]
    fn phone_number_serde_is_plain_string() {
        let n = PhoneNumber::from_e164("+14155550123").unwrap();
        let json = serde_json::to_string(&n).unwrap();
        assert_eq!(json, "\"+14155550123\"");
        assert!(serde_json::from_str::<PhoneNumber>("\"4155550123\"").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Arbitrary text never panics and never yields more entries than given.
        #[test]
        fn normalize_all_never_grows(raw in proptest::collection::vec("[0-9a-z +()\\-.x#]{0,20}", 0..8)) {
            let n = PhoneNumberNormalizer::new(Region::parse("US").unwrap());
            let out = n.normalize_all(&raw);
            prop_assert!(out.len() <= raw.len());
        }

        /// Same text, same region, same result.
        #[test]
        fn normalize_is_deterministic(text in "[0-9 +()\\-]{0,18}") {
            let n = PhoneNumberNormalizer::new(Region::parse("GB").unwrap());
            prop_assert_eq!(n.normalize(&text), n.normalize(&text));
        }

        /// Every success is well-formed E.164.
        #[test]
        fn successes_are_e164(text in "\\+?[0-9]{1,15}") {
            let n = PhoneNumberNormalizer::new(Region::parse("US").unwrap());
            if let Ok(number) = n.normalize(&text) {
                prop_assert!(PhoneNumber::from_e164(number.as_str()).is_ok());
            }
        }
    }
}
