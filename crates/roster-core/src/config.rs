//! # Runtime Configuration
//!
//! `RosterConfig` is loaded from YAML. Every field has a default, so an
//! empty document is a valid configuration. The CLI overlays its flags on
//! top of the loaded values.
//!
//! ```yaml
//! default_region: GB
//! local_number: "+447700900123"
//! name_ordering: last_first
//! max_concurrent_lookups: 32
//! avatar_comparison: content
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which name part leads when sorting contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameOrdering {
    /// "Ada Lovelace" sorts under A.
    #[default]
    FirstLast,
    /// "Ada Lovelace" sorts under L.
    LastFirst,
}

impl NameOrdering {
    /// `true` for [`NameOrdering::FirstLast`].
    pub fn is_first_name_first(self) -> bool {
        matches!(self, Self::FirstLast)
    }
}

/// How the group change detector decides that the avatar changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvatarComparison {
    /// Only a change in avatar presence counts.
    #[default]
    Presence,
    /// Presence changes and, when both sides have one, digest changes count.
    Content,
}

/// Configuration for contact resolution and group change detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// ISO 3166 region used to interpret numbers written without a country
    /// calling code, when no local number is configured.
    #[serde(default = "default_region")]
    pub default_region: String,
    /// The account's own number in E.164 form. When present, its region takes
    /// precedence over `default_region`.
    #[serde(default)]
    pub local_number: Option<String>,
    /// Sort order for contact lists.
    #[serde(default)]
    pub name_ordering: NameOrdering,
    /// Upper bound on directory lookups in flight during batch resolution.
    #[serde(default = "default_max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,
    /// Avatar change detection mode.
    #[serde(default)]
    pub avatar_comparison: AvatarComparison,
}

fn default_region() -> String {
    "US".to_string()
}

fn default_max_concurrent_lookups() -> usize {
    16
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            default_region: default_region(),
            local_number: None,
            name_ordering: NameOrdering::default(),
            max_concurrent_lookups: default_max_concurrent_lookups(),
            avatar_comparison: AvatarComparison::default(),
        }
    }
}

impl RosterConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Parse and validate a configuration document.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document; treat it as all defaults.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// Region codes are checked against phone metadata by `roster-phone`
    /// when the normalizer is built; here only their shape is checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let region = self.default_region.trim();
        if region.len() != 2 || !region.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::Invalid {
                field: "default_region",
                reason: format!("expected a two-letter region code, got {region:?}"),
            });
        }
        if let Some(local) = &self.local_number {
            if !local.trim().starts_with('+') {
                return Err(ConfigError::Invalid {
                    field: "local_number",
                    reason: format!("expected E.164 form starting with '+', got {local:?}"),
                });
            }
        }
        if self.max_concurrent_lookups == 0 {
            return Err(ConfigError::Invalid {
                field: "max_concurrent_lookups",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
