//! Version ranges and the common constraint abstraction
//!
//! A [`VersionRange`] is written in interval notation: `[1.0,2.0)` includes
//! `1.0` and excludes `2.0`. An empty bound is unbounded and always exclusive,
//! so `(,2.0]` and `[,2.0]` denote the same range.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::VersionError;
use crate::version::boundary::BoundaryType;
use crate::version::combination::VersionRangeCombination;
use crate::version::identifier::VersionIdentifier;
use crate::version::relation::VersionRangeRelation;

/// Anything a version can be checked against: a single version, a version
/// pattern or a range.
pub trait GenericVersionRange: fmt::Display {
    fn contains(&self, version: &VersionIdentifier) -> bool;

    /// True if more than a single version may be contained.
    fn is_pattern(&self) -> bool;

    fn min_version(&self) -> Option<&VersionIdentifier>;

    fn max_version(&self) -> Option<&VersionIdentifier>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionRange {
    min: Option<VersionIdentifier>,
    max: Option<VersionIdentifier>,
    boundary_type: BoundaryType,
}

impl VersionRange {
    /// Creates a range, failing if `min > max`, an absent bound is inclusive
    /// or a bound contains a `,` that would be read as the range delimiter.
    pub fn new(
        min: Option<VersionIdentifier>,
        max: Option<VersionIdentifier>,
        boundary_type: BoundaryType,
    ) -> Result<Self, VersionError> {
        let range = Self {
            min,
            max,
            boundary_type,
        };
        let has_comma = |bound: &Option<VersionIdentifier>| {
            bound
                .as_ref()
                .is_some_and(|version| version.to_string().contains(','))
        };
        if has_comma(&range.min) || has_comma(&range.max) {
            return Err(VersionError::InvalidRange(range.to_string()));
        }
        if let (Some(min), Some(max)) = (&range.min, &range.max) {
            if min.is_greater(max) {
                return Err(VersionError::InvalidRange(range.to_string()));
            }
        }
        if (range.min.is_none() && !boundary_type.is_left_exclusive())
            || (range.max.is_none() && !boundary_type.is_right_exclusive())
        {
            return Err(VersionError::InvalidRange(range.to_string()));
        }
        Ok(range)
    }

    /// Shortcut for a closed range `[min,max]`.
    pub fn closed(min: VersionIdentifier, max: VersionIdentifier) -> Result<Self, VersionError> {
        Self::new(Some(min), Some(max), BoundaryType::Closed)
    }

    /// The range `(,)` containing every version.
    pub fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
            boundary_type: BoundaryType::Open,
        }
    }

    pub fn min_version(&self) -> Option<&VersionIdentifier> {
        self.min.as_ref()
    }

    pub fn max_version(&self) -> Option<&VersionIdentifier> {
        self.max.as_ref()
    }

    pub fn boundary_type(&self) -> BoundaryType {
        self.boundary_type
    }

    pub fn is_left_exclusive(&self) -> bool {
        self.boundary_type.is_left_exclusive()
    }

    pub fn is_right_exclusive(&self) -> bool {
        self.boundary_type.is_right_exclusive()
    }

    pub fn contains(&self, version: &VersionIdentifier) -> bool {
        if let Some(min) = &self.min {
            let comparison = version.compare_version(min);
            if comparison.is_less() || (comparison.is_equal() && self.is_left_exclusive()) {
                return false;
            }
        }
        if let Some(max) = &self.max {
            let comparison = version.compare_version(max);
            if comparison.is_greater() || (comparison.is_equal() && self.is_right_exclusive()) {
                return false;
            }
        }
        true
    }

    pub fn relation(&self, other: &VersionRange) -> VersionRangeRelation {
        VersionRangeCombination::of(self, other).relation()
    }

    /// Merges both ranges if they relate at least as close as `required`.
    pub fn union(
        &self,
        other: &VersionRange,
        required: VersionRangeRelation,
    ) -> Option<VersionRange> {
        VersionRangeCombination::of(self, other).union(required)
    }

    pub fn intersection(&self, other: &VersionRange) -> Option<VersionRange> {
        VersionRangeCombination::of(self, other).intersection()
    }
}

impl GenericVersionRange for VersionRange {
    fn contains(&self, version: &VersionIdentifier) -> bool {
        VersionRange::contains(self, version)
    }

    fn is_pattern(&self) -> bool {
        true
    }

    fn min_version(&self) -> Option<&VersionIdentifier> {
        self.min.as_ref()
    }

    fn max_version(&self) -> Option<&VersionIdentifier> {
        self.max.as_ref()
    }
}

impl GenericVersionRange for VersionIdentifier {
    fn contains(&self, version: &VersionIdentifier) -> bool {
        self.matches(version)
    }

    fn is_pattern(&self) -> bool {
        VersionIdentifier::is_pattern(self)
    }

    fn min_version(&self) -> Option<&VersionIdentifier> {
        Some(self)
    }

    fn max_version(&self) -> Option<&VersionIdentifier> {
        Some(self)
    }
}

impl PartialOrd for VersionRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionRange {
    /// Orders by minimum (unbounded first), a left-exclusive range before a
    /// left-inclusive one with the same minimum, then by maximum.
    fn cmp(&self, other: &Self) -> Ordering {
        self.min
            .cmp(&other.min)
            .then_with(|| {
                other
                    .is_left_exclusive()
                    .cmp(&self.is_left_exclusive())
            })
            .then_with(|| match (&self.max, &other.max) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(max), Some(other_max)) => max.cmp(other_max),
            })
            .then_with(|| {
                other
                    .is_right_exclusive()
                    .cmp(&self.is_right_exclusive())
            })
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.boundary_type.prefix())?;
        if let Some(min) = &self.min {
            write!(f, "{}", min)?;
        }
        f.write_str(",")?;
        if let Some(max) = &self.max {
            write!(f, "{}", max)?;
        }
        write!(f, "{}", self.boundary_type.suffix())
    }
}

fn parse_bound(bound: &str) -> Result<Option<VersionIdentifier>, VersionError> {
    let bound = bound.trim();
    if bound.is_empty() {
        Ok(None)
    } else {
        bound.parse().map(Some)
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let (left_exclusive, value) = match value.strip_prefix('(') {
            Some(rest) => (true, rest),
            None => (false, value.strip_prefix('[').unwrap_or(value)),
        };
        let (right_exclusive, value) = match value.strip_suffix(')') {
            Some(rest) => (true, rest),
            None => (false, value.strip_suffix(']').unwrap_or(value)),
        };
        let (min, max) = value
            .split_once(',')
            .ok_or_else(|| VersionError::InvalidRange(s.to_string()))?;
        let min = parse_bound(min)?;
        let max = parse_bound(max)?;
        let boundary_type = BoundaryType::of(
            left_exclusive || min.is_none(),
            right_exclusive || max.is_none(),
        );
        Self::new(min, max, boundary_type)
    }
}

impl Serialize for VersionRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        VersionRange::from_str(&s).map_err(de::Error::custom)
    }
}

/// A version constraint as given by a user: a version, a pattern or a range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionConstraint {
    Version(VersionIdentifier),
    Range(VersionRange),
}

impl VersionConstraint {
    fn inner(&self) -> &dyn GenericVersionRange {
        match self {
            VersionConstraint::Version(version) => version,
            VersionConstraint::Range(range) => range,
        }
    }
}

impl GenericVersionRange for VersionConstraint {
    fn contains(&self, version: &VersionIdentifier) -> bool {
        self.inner().contains(version)
    }

    fn is_pattern(&self) -> bool {
        self.inner().is_pattern()
    }

    fn min_version(&self) -> Option<&VersionIdentifier> {
        match self {
            VersionConstraint::Version(version) => Some(version),
            VersionConstraint::Range(range) => range.min_version(),
        }
    }

    fn max_version(&self) -> Option<&VersionIdentifier> {
        match self {
            VersionConstraint::Version(version) => Some(version),
            VersionConstraint::Range(range) => range.max_version(),
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionConstraint::Version(version) => write!(f, "{}", version),
            VersionConstraint::Range(range) => write!(f, "{}", range),
        }
    }
}

impl FromStr for VersionConstraint {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(',') {
            s.parse().map(VersionConstraint::Range)
        } else {
            s.parse().map(VersionConstraint::Version)
        }
    }
}
