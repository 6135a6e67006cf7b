//! Structured version identifier
//!
//! A [`VersionIdentifier`] owns the parsed segments of a version string and
//! derives validity and development phase once at construction. Comparison
//! walks both segment lists in lock-step, substituting the empty segment for
//! a list that ends early.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::VersionError;
use crate::version::comparison::{VersionComparison, VersionMatch};
use crate::version::phase::VersionLetters;
use crate::version::segment::{self, VersionPattern, VersionSegment};
use crate::version::tokenizer;

static LATEST: LazyLock<VersionIdentifier> = LazyLock::new(|| {
    VersionIdentifier::from_segments(vec![VersionSegment::wildcard(
        VersionPattern::AnyStable,
    )])
});

static LATEST_UNSTABLE: LazyLock<VersionIdentifier> = LazyLock::new(|| {
    VersionIdentifier::from_segments(vec![VersionSegment::wildcard(VersionPattern::Any)])
});

#[derive(Debug, Clone)]
pub struct VersionIdentifier {
    segments: Vec<VersionSegment>,
    development_phase: VersionLetters,
    valid: bool,
}

impl VersionIdentifier {
    fn from_segments(segments: Vec<VersionSegment>) -> Self {
        let head_is_plain = segments
            .first()
            .is_some_and(|head| head.separator().is_empty() && head.letters().is_empty());
        let all_valid = segments.iter().all(VersionSegment::is_valid);
        let has_positive_number = segments
            .iter()
            .any(|segment| segment.number().is_some_and(|number| number > 0));
        let development_phase = segment::development_phase(&segments);
        let single_phase = development_phase != VersionLetters::Undefined;
        Self {
            valid: head_is_plain && all_valid && has_positive_number && single_phase,
            development_phase,
            segments,
        }
    }

    /// Parses the given version, returning `None` if it is unparsable.
    ///
    /// The input is trimmed. `latest` and `*` yield [`VersionIdentifier::latest`].
    pub fn of(version: &str) -> Option<Self> {
        version.parse().ok()
    }

    /// The pattern `*` matching the latest stable version.
    pub fn latest() -> &'static VersionIdentifier {
        &LATEST
    }

    /// The pattern `*!` matching the latest version including development phases.
    pub fn latest_unstable() -> &'static VersionIdentifier {
        &LATEST_UNSTABLE
    }

    pub fn segments(&self) -> &[VersionSegment] {
        &self.segments
    }

    /// A valid version starts with a plain number, has only valid segments,
    /// at least one number greater than zero and at most one development phase.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_pattern(&self) -> bool {
        self.segments.iter().any(VersionSegment::is_pattern)
    }

    pub fn is_stable(&self) -> bool {
        self.development_phase.is_stable()
    }

    /// The development phase aggregated over all segments.
    ///
    /// [`VersionLetters::Empty`] if there is none, [`VersionLetters::Undefined`]
    /// if there are several.
    pub fn development_phase(&self) -> &VersionLetters {
        &self.development_phase
    }

    pub fn count_digits(&self) -> usize {
        segment::count_digits(&self.segments)
    }

    pub fn compare_version(&self, other: &VersionIdentifier) -> VersionComparison {
        let mut unsafe_seen = false;
        let mut index = 0;
        loop {
            let left = VersionSegment::at(&self.segments, index);
            let right = VersionSegment::at(&other.segments, index);
            let result = left.compare_version(right);
            let exhausted = index >= self.segments.len() && index >= other.segments.len();
            if !result.is_equal() || exhausted {
                return if unsafe_seen {
                    result.with_unsafe()
                } else {
                    result
                };
            }
            unsafe_seen |= result.is_unsafe();
            index += 1;
        }
    }

    /// Compares optional versions where `None` stands for an unbounded side.
    ///
    /// `None` is negative infinity if `none_is_negative_infinity` is set and
    /// positive infinity otherwise. Two `None` values are equal.
    pub fn compare_optional(
        left: Option<&VersionIdentifier>,
        right: Option<&VersionIdentifier>,
        none_is_negative_infinity: bool,
    ) -> VersionComparison {
        match (left, right) {
            (None, None) => VersionComparison::EQUAL,
            (None, Some(_)) if none_is_negative_infinity => VersionComparison::LESS,
            (None, Some(_)) => VersionComparison::GREATER,
            (Some(_), None) if none_is_negative_infinity => VersionComparison::GREATER,
            (Some(_), None) => VersionComparison::LESS,
            (Some(left), Some(right)) => left.compare_version(right),
        }
    }

    pub fn is_less(&self, other: &VersionIdentifier) -> bool {
        self.compare_version(other).is_less()
    }

    pub fn is_less_or_equal(&self, other: &VersionIdentifier) -> bool {
        self.compare_version(other).is_less_or_equal()
    }

    pub fn is_greater(&self, other: &VersionIdentifier) -> bool {
        self.compare_version(other).is_greater()
    }

    pub fn is_greater_or_equal(&self, other: &VersionIdentifier) -> bool {
        self.compare_version(other).is_greater_or_equal()
    }

    /// Matches the given version against this one.
    ///
    /// Without wildcards this is plain equality, otherwise `17*` matches
    /// `17.0.1` but not `17.0.1-rc1`, which needs `17*!`.
    pub fn matches(&self, other: &VersionIdentifier) -> bool {
        let mut index = 0;
        loop {
            let pattern = VersionSegment::at(&self.segments, index);
            let rest = other.segments.get(index..).unwrap_or_default();
            match pattern.matches(rest) {
                VersionMatch::Match => return true,
                VersionMatch::Mismatch => return false,
                VersionMatch::Equal => index += 1,
            }
        }
    }

    /// Increments the number at `digit` (counting segments with digits from
    /// zero) and resets all following numbers to zero.
    pub fn increment_segment(
        &self,
        digit: usize,
        keep_letters: bool,
    ) -> Result<VersionIdentifier, VersionError> {
        if self.is_pattern() {
            return Err(VersionError::PatternIncrement(self.to_string()));
        }
        let segments = segment::increment(&self.segments, digit, keep_letters)?;
        Ok(Self::from_segments(segments))
    }

    pub fn increment_major(&self, keep_letters: bool) -> Result<VersionIdentifier, VersionError> {
        self.increment_segment(0, keep_letters)
    }

    pub fn increment_minor(&self, keep_letters: bool) -> Result<VersionIdentifier, VersionError> {
        self.increment_segment(1, keep_letters)
    }

    pub fn increment_patch(&self, keep_letters: bool) -> Result<VersionIdentifier, VersionError> {
        self.increment_segment(2, keep_letters)
    }

    pub fn increment_last_digit(
        &self,
        keep_letters: bool,
    ) -> Result<VersionIdentifier, VersionError> {
        self.increment_segment(self.count_digits().saturating_sub(1), keep_letters)
    }
}

impl FromStr for VersionIdentifier {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version = s.trim();
        if version == "latest" || version == "*" {
            return Ok(LATEST.clone());
        }
        if version.is_empty() {
            return Err(VersionError::Unparsable(s.to_string()));
        }
        tokenizer::parse_segments(version).map(Self::from_segments)
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.segments
            .iter()
            .try_for_each(|segment| write!(f, "{}", segment))
    }
}

impl PartialEq for VersionIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for VersionIdentifier {}

impl Hash for VersionIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl PartialOrd for VersionIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_version(other)
            .ordering()
            .then_with(|| self.to_string().cmp(&other.to_string()))
    }
}

impl Serialize for VersionIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        VersionIdentifier::from_str(&s).map_err(de::Error::custom)
    }
}
