//! Font naming policies
//!
//! A build either uses fixed names, so identical input gives a byte-identical
//! artifact, or stamps the internal name with the UTC build time for
//! provenance tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Family name used when neither the CLI nor the config file sets one
pub const DEFAULT_FAMILY_NAME: &str = "STDevGen_1stMix";

/// Style suffix appended to the family name to form the full name
const FULL_NAME_STYLE: &str = "Normal";

/// How the font's internal name is chosen for a build
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IdentityPolicy {
    /// All names are constant strings
    #[default]
    Fixed,
    /// The internal name embeds the UTC build time
    Timestamped,
}

/// Family, full and internal (PostScript) names of the font
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontIdentity {
    pub family_name: String,
    pub full_name: String,
    pub internal_name: String,
}

impl FontIdentity {
    /// Names that never change between builds
    pub fn fixed(family_name: &str) -> Self {
        Self {
            family_name: family_name.to_string(),
            full_name: format!("{family_name}-{FULL_NAME_STYLE}"),
            internal_name: family_name.to_string(),
        }
    }

    /// Names whose internal name records the given build time
    ///
    /// The stamp is ISO-8601 basic format with microseconds, so internal
    /// names sort by build time and stay valid PostScript names.
    pub fn timestamped_at(family_name: &str, built_at: DateTime<Utc>) -> Self {
        let stamp = built_at.format("%Y%m%dT%H%M%S%.6fZ");
        Self {
            internal_name: format!("{family_name}-{stamp}"),
            ..Self::fixed(family_name)
        }
    }

    /// Resolve the identity for a build started now
    pub fn for_policy(policy: IdentityPolicy, family_name: &str) -> Self {
        match policy {
            IdentityPolicy::Fixed => Self::fixed(family_name),
            IdentityPolicy::Timestamped => Self::timestamped_at(family_name, Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_identity_is_reproducible() {
        let first = FontIdentity::for_policy(IdentityPolicy::Fixed, DEFAULT_FAMILY_NAME);
        let second = FontIdentity::for_policy(IdentityPolicy::Fixed, DEFAULT_FAMILY_NAME);
        assert_eq!(first, second);
        assert_eq!(first.family_name, "STDevGen_1stMix");
        assert_eq!(first.full_name, "STDevGen_1stMix-Normal");
        assert_eq!(first.internal_name, "STDevGen_1stMix");
    }

    #[test]
    fn test_timestamped_identity_differs_across_times() {
        let earlier = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 1).unwrap();

        let a = FontIdentity::timestamped_at(DEFAULT_FAMILY_NAME, earlier);
        let b = FontIdentity::timestamped_at(DEFAULT_FAMILY_NAME, later);

        assert_ne!(a.internal_name, b.internal_name);
        assert!(a.internal_name < b.internal_name, "names should sort by time");
        assert_eq!(a.family_name, b.family_name);
        assert_eq!(a.full_name, b.full_name);
        assert_eq!(
            a.internal_name,
            "STDevGen_1stMix-20240301T120000.000000Z"
        );
    }
}
