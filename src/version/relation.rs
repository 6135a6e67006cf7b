use std::fmt;
use std::str::FromStr;

use crate::version::identifier::VersionIdentifier;

/// How two version ranges relate, from loosest to closest.
///
/// The order matters: a union only merges ranges whose relation is at least
/// the required one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionRangeRelation {
    /// A gap lies between the ranges, e.g. `[1.0,1.1]` and `[1.3,2.0]`
    Disjunct,
    /// Only a version step lies between the ranges, e.g. `[1.0,1.1]` and `[1.2,2.0]`
    ConnectedLoosely,
    /// The ranges touch at a bound included by exactly one of them, e.g. `[1.0,1.1)` and `[1.1,2.0]`
    Connected,
    /// The ranges share at least one version
    Overlapping,
}

impl VersionRangeRelation {
    /// Classifies two ranges by the larger of their minimums and the smaller
    /// of their maximums. `None` stands for an unbounded side.
    pub fn of(
        max_min: Option<&VersionIdentifier>,
        max_min_exclusive: bool,
        min_max: Option<&VersionIdentifier>,
        min_max_exclusive: bool,
    ) -> Self {
        let (Some(max_min), Some(min_max)) = (max_min, min_max) else {
            return VersionRangeRelation::Overlapping;
        };
        let comparison = min_max.compare_version(max_min);
        if comparison.is_greater() {
            return VersionRangeRelation::Overlapping;
        }
        if comparison.is_equal() {
            return match (max_min_exclusive, min_max_exclusive) {
                (false, false) => VersionRangeRelation::Overlapping,
                (true, true) => VersionRangeRelation::Disjunct,
                _ => VersionRangeRelation::Connected,
            };
        }
        match min_max.increment_last_digit(true) {
            Ok(next) if next.is_greater_or_equal(max_min) => VersionRangeRelation::ConnectedLoosely,
            _ => VersionRangeRelation::Disjunct,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionRangeRelation::Disjunct => "disjunct",
            VersionRangeRelation::ConnectedLoosely => "connected-loosely",
            VersionRangeRelation::Connected => "connected",
            VersionRangeRelation::Overlapping => "overlapping",
        }
    }
}

impl fmt::Display for VersionRangeRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionRangeRelation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "disjunct" => Ok(VersionRangeRelation::Disjunct),
            "connected-loosely" => Ok(VersionRangeRelation::ConnectedLoosely),
            "connected" => Ok(VersionRangeRelation::Connected),
            "overlapping" => Ok(VersionRangeRelation::Overlapping),
            other => Err(format!("Unknown range relation: {}", other)),
        }
    }
}
