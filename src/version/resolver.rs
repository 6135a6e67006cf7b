//! Resolution of version constraints against available versions
//!
//! Tool repositories provide their versions sorted in descending order, so
//! the first version satisfying a constraint is the latest one that does.

use tracing::debug;

use crate::error::VersionError;
use crate::version::identifier::VersionIdentifier;
use crate::version::range::GenericVersionRange;

/// Resolve a version constraint to a concrete version
///
/// # Arguments
/// * `constraint` - A version, a version pattern like `17*` or a range
/// * `versions` - The available versions sorted in descending order
///
/// # Returns
/// The version itself if it is not a pattern and available, otherwise the
/// first (latest) available version contained in the constraint.
pub fn resolve_version_pattern(
    constraint: &dyn GenericVersionRange,
    versions: &[VersionIdentifier],
) -> Result<VersionIdentifier, VersionError> {
    if !constraint.is_pattern() {
        let exact = versions.iter().find(|version| {
            constraint.min_version() == Some(*version) && constraint.max_version() == Some(*version)
        });
        if let Some(version) = exact {
            debug!("Resolved version {} to version {}", constraint, version);
            return Ok(version.clone());
        }
    }
    match versions.iter().find(|version| constraint.contains(version)) {
        Some(version) => {
            debug!("Resolved version pattern {} to version {}", constraint, version);
            Ok(version.clone())
        }
        None => Err(VersionError::NoMatchingVersion {
            constraint: constraint.to_string(),
            available: versions.len(),
        }),
    }
}

/// Resolve the latest stable version, used when no constraint is given
pub fn resolve_latest(versions: &[VersionIdentifier]) -> Result<VersionIdentifier, VersionError> {
    resolve_version_pattern(VersionIdentifier::latest(), versions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::range::{VersionConstraint, VersionRange};

    fn versions(list: &[&str]) -> Vec<VersionIdentifier> {
        list.iter()
            .map(|version| VersionIdentifier::of(version).unwrap())
            .collect()
    }

    fn v(version: &str) -> VersionIdentifier {
        VersionIdentifier::of(version).unwrap()
    }

    #[test]
    fn resolve_version_pattern_prefers_exact_version() {
        let available = versions(&["18.0", "17.0.2", "17.0.1", "17"]);

        let resolved = resolve_version_pattern(&v("17.0.1"), &available);

        assert_eq!(resolved, Ok(v("17.0.1")));
    }

    #[test]
    fn resolve_version_pattern_returns_latest_match() {
        let available = versions(&["18.0", "17.0.2-rc1", "17.0.1", "16.9"]);

        assert_eq!(resolve_version_pattern(&v("17*"), &available), Ok(v("17.0.1")));
        assert_eq!(
            resolve_version_pattern(&v("17*!"), &available),
            Ok(v("17.0.2-rc1"))
        );
    }

    #[test]
    fn resolve_version_pattern_accepts_ranges() {
        let available = versions(&["3.0", "2.5", "2.0", "1.0"]);
        let range: VersionRange = "[2.0,3.0)".parse().unwrap();

        assert_eq!(resolve_version_pattern(&range, &available), Ok(v("2.5")));

        let constraint: VersionConstraint = "(,2.0]".parse().unwrap();
        assert_eq!(resolve_version_pattern(&constraint, &available), Ok(v("2.0")));
    }

    #[test]
    fn resolve_version_pattern_fails_without_match() {
        let available = versions(&["2.0", "1.0"]);

        let result = resolve_version_pattern(&v("3*"), &available);

        assert_eq!(
            result,
            Err(VersionError::NoMatchingVersion {
                constraint: "3*".to_string(),
                available: 2,
            })
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "Could not find any version matching '3*' - there are 2 version(s) available but none matched!"
        );
    }

    #[test]
    fn resolve_latest_skips_unstable_versions() {
        let available = versions(&["2.0-SNAPSHOT", "1.9", "1.8"]);

        assert_eq!(resolve_latest(&available), Ok(v("1.9")));
    }

    #[test]
    fn resolve_latest_fails_for_empty_list() {
        assert!(resolve_latest(&[]).is_err());
    }
}
