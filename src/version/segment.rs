//! A single segment of a version identifier
//!
//! A version like `1.0-rc2` consists of the segments `1`, `.0` and `-rc2`.
//! Operations that walk a whole version take the segments following a
//! segment as a slice and substitute [`VersionSegment::empty`] once a
//! version is exhausted.

use std::cmp::Ordering;
use std::fmt;

use crate::error::VersionError;
use crate::version::comparison::{VersionComparison, VersionMatch};
use crate::version::phase::{VersionLetters, VersionPhase};

const VALID_SEPARATORS: [&str; 3] = [".", "-", "_"];

/// Wildcard marker at the end of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VersionPattern {
    #[default]
    None,
    /// `*` matches any stable version
    AnyStable,
    /// `*!` matches any version including development phases
    Any,
}

impl VersionPattern {
    pub fn of(pattern: &str) -> Result<Self, VersionError> {
        match pattern {
            "" => Ok(VersionPattern::None),
            "*" => Ok(VersionPattern::AnyStable),
            "*!" => Ok(VersionPattern::Any),
            other => Err(VersionError::InvalidPattern(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionPattern::None => "",
            VersionPattern::AnyStable => "*",
            VersionPattern::Any => "*!",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, VersionPattern::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionSegment {
    separator: String,
    letters: VersionLetters,
    digits: String,
    number: Option<u64>,
    pattern: VersionPattern,
}

static EMPTY: VersionSegment = VersionSegment {
    separator: String::new(),
    letters: VersionLetters::Empty,
    digits: String::new(),
    number: None,
    pattern: VersionPattern::None,
};

impl VersionSegment {
    /// Creates a segment from its raw parts.
    ///
    /// A `*!` pattern without letters implicitly accepts any development phase.
    pub fn new(
        separator: &str,
        letters: &str,
        digits: &str,
        pattern: &str,
    ) -> Result<Self, VersionError> {
        let pattern = VersionPattern::of(pattern)?;
        let letters = if pattern == VersionPattern::Any && letters.is_empty() {
            VersionLetters::Unstable
        } else {
            VersionLetters::of(letters)
        };
        let number = if digits.is_empty() {
            None
        } else {
            Some(
                digits
                    .parse::<u64>()
                    .map_err(|_| VersionError::Unparsable(digits.to_string()))?,
            )
        };
        Ok(Self {
            separator: separator.to_string(),
            letters,
            digits: digits.to_string(),
            number,
            pattern,
        })
    }

    /// A lone wildcard segment (`*` or `*!`).
    pub(crate) fn wildcard(pattern: VersionPattern) -> Self {
        let letters = match pattern {
            VersionPattern::Any => VersionLetters::Unstable,
            _ => VersionLetters::Empty,
        };
        Self {
            separator: String::new(),
            letters,
            digits: String::new(),
            number: None,
            pattern,
        }
    }

    /// Sentinel standing in for the segments after the end of a version.
    pub fn empty() -> &'static VersionSegment {
        &EMPTY
    }

    /// Returns the segment at `index` or the empty sentinel past the end.
    pub fn at(segments: &[VersionSegment], index: usize) -> &VersionSegment {
        segments.get(index).unwrap_or(&EMPTY)
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn letters(&self) -> &VersionLetters {
        &self.letters
    }

    pub fn phase(&self) -> VersionPhase {
        self.letters.phase()
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn number(&self) -> Option<u64> {
        self.number
    }

    pub fn pattern(&self) -> VersionPattern {
        self.pattern
    }

    pub fn is_pattern(&self) -> bool {
        !self.pattern.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.separator.is_empty()
            && self.letters.is_empty()
            && self.digits.is_empty()
            && self.pattern.is_none()
    }

    /// A segment is valid if it has no pattern, its separator is a single `.`,
    /// `-` or `_` (or absent) and its letters form a valid phase together with
    /// its number.
    pub fn is_valid(&self) -> bool {
        if self.is_pattern() {
            return false;
        }
        if !self.separator.is_empty() && !VALID_SEPARATORS.contains(&self.separator.as_str()) {
            return false;
        }
        self.phase().is_valid(self.number)
    }

    pub fn compare_version(&self, other: &VersionSegment) -> VersionComparison {
        let letters = self.letters.compare_version(&other.letters);
        if !letters.is_equal() {
            return letters;
        }
        let result = self.compare_separator_and_number(other);
        if letters.is_unsafe() {
            result.with_unsafe()
        } else {
            result
        }
    }

    fn compare_separator_and_number(&self, other: &VersionSegment) -> VersionComparison {
        // "_" joins build metadata: above no separator, below any other one
        match (self.separator == "_", other.separator == "_") {
            (false, true) if self.separator.is_empty() => return VersionComparison::LESS,
            (false, true) => return VersionComparison::GREATER,
            (true, false) if other.separator.is_empty() => return VersionComparison::GREATER,
            (true, false) => return VersionComparison::LESS,
            _ => {}
        }
        if self.number != other.number {
            if self.number.is_none() && self.is_pattern() {
                return VersionComparison::LESS_UNSAFE;
            }
            if other.number.is_none() && other.is_pattern() {
                return VersionComparison::GREATER_UNSAFE;
            }
            return match self.number.cmp(&other.number) {
                Ordering::Less => VersionComparison::LESS,
                _ => VersionComparison::GREATER,
            };
        }
        if self.separator == other.separator {
            VersionComparison::EQUAL
        } else {
            VersionComparison::EQUAL_UNSAFE
        }
    }

    /// Matches this (pattern) segment against the first of `others`.
    ///
    /// `others` holds the counterpart and all segments following it, an empty
    /// slice stands for an exhausted version.
    pub fn matches(&self, others: &[VersionSegment]) -> VersionMatch {
        let other = Self::at(others, 0);
        if self.is_empty() && other.is_empty() {
            return VersionMatch::Match;
        }
        let pattern = self.is_pattern();
        if pattern {
            if !self.digits.is_empty() && self.number != other.number {
                return VersionMatch::Mismatch;
            }
            if !self.separator.is_empty() && self.separator != other.separator {
                return VersionMatch::Mismatch;
            }
        } else if self.number != other.number || self.separator != other.separator {
            return VersionMatch::Mismatch;
        }
        let result = self.letters.matches(&other.letters, pattern);
        if result != VersionMatch::Equal {
            return result;
        }
        match self.pattern {
            VersionPattern::None => result,
            VersionPattern::AnyStable if development_phase(others).is_unstable() => {
                VersionMatch::Mismatch
            }
            VersionPattern::AnyStable | VersionPattern::Any => VersionMatch::Match,
        }
    }
}

/// Aggregates the development phase over the given segments.
///
/// Returns [`VersionLetters::Empty`] if no segment carries a development
/// phase and [`VersionLetters::Undefined`] if more than one does.
pub fn development_phase(segments: &[VersionSegment]) -> VersionLetters {
    let mut phases = segments
        .iter()
        .map(|segment| &segment.letters)
        .filter(|letters| letters.is_development_phase());
    match (phases.next(), phases.next()) {
        (None, _) => VersionLetters::Empty,
        (Some(letters), None) => letters.clone(),
        (Some(_), Some(_)) => VersionLetters::Undefined,
    }
}

/// Number of segments carrying digits.
pub fn count_digits(segments: &[VersionSegment]) -> usize {
    segments
        .iter()
        .filter(|segment| segment.number.is_some())
        .count()
}

/// Increments the numeric segment at `digit_keep_count` (counting only
/// segments with digits) and resets all following numbers to zero.
///
/// Leading zeros are preserved ("09" becomes "10", "007" becomes "008").
/// Without `keep_letters` letters of modified segments are dropped and
/// segments without digits after the incremented one vanish. Fails if the
/// incremented number overflows.
pub fn increment(
    segments: &[VersionSegment],
    digit_keep_count: usize,
    keep_letters: bool,
) -> Result<Vec<VersionSegment>, VersionError> {
    let mut keep = isize::try_from(digit_keep_count).unwrap_or(isize::MAX);
    let mut result = Vec::with_capacity(segments.len());
    for segment in segments {
        let current = keep;
        if segment.number.is_some() {
            keep -= 1;
        }
        let modified = current < 0 || (current == 0 && segment.number.is_some());
        if !modified {
            result.push(segment.clone());
            continue;
        }
        let letters = if keep_letters {
            segment.letters.clone()
        } else {
            VersionLetters::Empty
        };
        match segment.number {
            Some(number) => {
                let number = if current == 0 {
                    number
                        .checked_add(1)
                        .ok_or_else(|| VersionError::IncrementOverflow(segment.to_string()))?
                } else {
                    0
                };
                let digits = format!("{:0width$}", number, width = segment.digits.len());
                result.push(VersionSegment {
                    separator: segment.separator.clone(),
                    letters,
                    digits,
                    number: Some(number),
                    pattern: segment.pattern,
                });
            }
            None if keep_letters => result.push(segment.clone()),
            None => {}
        }
    }
    Ok(result)
}

impl fmt::Display for VersionSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.separator,
            self.letters,
            self.digits,
            self.pattern.as_str()
        )
    }
}
