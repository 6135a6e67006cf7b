use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SecurityError;
use crate::version::{VersionIdentifier, VersionRange, VersionRangeRelation};

/// A known vulnerability together with the version ranges it affects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cve {
    pub id: String,
    pub severity: f64,
    pub versions: Vec<VersionRange>,
}

impl Cve {
    pub fn new(id: impl Into<String>, severity: f64, versions: Vec<VersionRange>) -> Self {
        Self {
            id: id.into(),
            severity,
            versions,
        }
    }

    /// True if any of the affected ranges contains the version.
    pub fn affects(&self, version: &VersionIdentifier) -> bool {
        self.versions.iter().any(|range| range.contains(version))
    }

    /// Merges the ranges of another report of the same vulnerability.
    pub fn merge(&self, other: &Cve) -> Result<Cve, SecurityError> {
        if self.id != other.id {
            return Err(SecurityError::CveMismatch {
                left: self.id.clone(),
                right: other.id.clone(),
                reason: "different ids".to_string(),
            });
        }
        if self.severity != other.severity {
            return Err(SecurityError::CveMismatch {
                left: self.id.clone(),
                right: other.id.clone(),
                reason: format!("severity {} != {}", self.severity, other.severity),
            });
        }
        let mut versions = self.versions.clone();
        for range in &other.versions {
            merge_version_range(&mut versions, range.clone());
        }
        Ok(Cve::new(self.id.clone(), self.severity, versions))
    }

    pub fn severity_sum<'a>(cves: impl IntoIterator<Item = &'a Cve>) -> f64 {
        cves.into_iter().map(|cve| cve.severity).sum()
    }
}

impl fmt::Display for Cve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranges: Vec<String> = self.versions.iter().map(ToString::to_string).collect();
        write!(
            f,
            "{} (severity {}): {}",
            self.id,
            self.severity,
            ranges.join(", ")
        )
    }
}

/// Adds `range` to the sorted list of disjoint ranges.
///
/// Every existing range connected at least loosely to the new one is merged
/// into it, the result is inserted at its position by minimum.
pub fn merge_version_range(ranges: &mut Vec<VersionRange>, range: VersionRange) {
    let mut current = range;
    let mut kept = Vec::with_capacity(ranges.len() + 1);
    for existing in ranges.drain(..) {
        match existing.union(&current, VersionRangeRelation::ConnectedLoosely) {
            Some(merged) => current = merged,
            None => kept.push(existing),
        }
    }
    let index = kept.partition_point(|existing| {
        VersionIdentifier::compare_optional(
            existing.min_version(),
            current.min_version(),
            true,
        )
        .is_less()
    });
    kept.insert(index, current);
    *ranges = kept;
}

/// Folds the given ranges into the minimal sorted list of disjoint ranges.
pub fn merge_ranges(ranges: impl IntoIterator<Item = VersionRange>) -> Vec<VersionRange> {
    let mut merged = Vec::new();
    for range in ranges {
        merge_version_range(&mut merged, range);
    }
    merged
}
