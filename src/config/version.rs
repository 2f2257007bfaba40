//! Moltin API version definitions.
//!
//! This module provides the [`ApiVersion`] enum for specifying which version
//! segment is prefixed to every resource path.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Moltin API version.
///
/// The platform exposes its resource endpoints under a single version segment
/// (`/v2/...`). A `Custom` variant allows pointing at any other segment.
///
/// # Example
///
/// ```rust
/// use moltin_api::ApiVersion;
///
/// let version = ApiVersion::latest();
/// assert_eq!(version.to_string(), "v2");
///
/// let version: ApiVersion = "v2".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ApiVersion {
    /// API version 2.
    #[default]
    V2,
    /// Any other single-segment version string.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2
    }

    /// Checks that the version is a single, non-empty path segment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiVersion`] for an empty segment or one
    /// containing `/`, `?`, `#` or whitespace.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let segment = self.as_segment();
        let forbidden = |c: char| matches!(c, '/' | '?' | '#') || c.is_whitespace();
        if segment.is_empty() || segment.contains(forbidden) {
            return Err(ConfigError::InvalidApiVersion {
                version: segment.to_string(),
            });
        }
        Ok(())
    }

    /// Returns the version as a path segment.
    #[must_use]
    pub fn as_segment(&self) -> &str {
        match self {
            Self::V2 => "v2",
            Self::Custom(v) => v,
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_segment())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version = match s.trim().trim_matches('/') {
            "v2" => Self::V2,
            other => Self::Custom(other.to_string()),
        };
        version
            .validate()
            .map_err(|_| ConfigError::InvalidApiVersion {
                version: s.to_string(),
            })?;
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_is_v2() {
        assert_eq!(ApiVersion::latest(), ApiVersion::V2);
        assert_eq!(ApiVersion::default(), ApiVersion::V2);
    }

    #[test]
    fn test_parse_known_and_custom_versions() {
        assert_eq!("v2".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
        assert_eq!("/v2/".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
        assert_eq!(
            "v3".parse::<ApiVersion>().unwrap(),
            ApiVersion::Custom("v3".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_multi_segment_versions() {
        assert!(matches!(
            "v2/extra".parse::<ApiVersion>(),
            Err(ConfigError::InvalidApiVersion { .. })
        ));
        assert!("".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_validate_rejects_malformed_custom_versions() {
        assert!(ApiVersion::V2.validate().is_ok());
        assert!(ApiVersion::Custom("v3".to_string()).validate().is_ok());
        assert!(matches!(
            ApiVersion::Custom(String::new()).validate(),
            Err(ConfigError::InvalidApiVersion { .. })
        ));
        assert!(ApiVersion::Custom("a/b".to_string()).validate().is_err());
        assert!(ApiVersion::Custom("v 2".to_string()).validate().is_err());
    }

    #[test]
    fn test_display_uses_segment() {
        assert_eq!(format!("{}", ApiVersion::V2), "v2");
        assert_eq!(ApiVersion::Custom("beta".to_string()).to_string(), "beta");
    }
}
