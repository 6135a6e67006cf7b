//! Results of version comparison and pattern matching

use std::cmp::Ordering;
use std::fmt;

/// Outcome of comparing two versions.
///
/// Besides the plain [`Ordering`] the result carries whether the ordering is
/// certain. Unrecognized letters (e.g. code names) or differing separators
/// that are otherwise equal cannot be ordered reliably, so such results are
/// flagged as unsafe. Sorting treats unsafe results as their plain ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionComparison {
    ordering: Ordering,
    certain: bool,
}

impl VersionComparison {
    pub const LESS: Self = Self::new(Ordering::Less, true);
    pub const EQUAL: Self = Self::new(Ordering::Equal, true);
    pub const GREATER: Self = Self::new(Ordering::Greater, true);
    pub const LESS_UNSAFE: Self = Self::new(Ordering::Less, false);
    pub const EQUAL_UNSAFE: Self = Self::new(Ordering::Equal, false);
    pub const GREATER_UNSAFE: Self = Self::new(Ordering::Greater, false);

    pub const fn new(ordering: Ordering, certain: bool) -> Self {
        Self { ordering, certain }
    }

    pub fn ordering(&self) -> Ordering {
        self.ordering
    }

    pub fn is_unsafe(&self) -> bool {
        !self.certain
    }

    pub fn is_less(&self) -> bool {
        self.ordering == Ordering::Less
    }

    pub fn is_equal(&self) -> bool {
        self.ordering == Ordering::Equal
    }

    pub fn is_greater(&self) -> bool {
        self.ordering == Ordering::Greater
    }

    pub fn is_less_or_equal(&self) -> bool {
        self.ordering != Ordering::Greater
    }

    pub fn is_greater_or_equal(&self) -> bool {
        self.ordering != Ordering::Less
    }

    /// Returns the same ordering flagged as unsafe.
    pub fn with_unsafe(self) -> Self {
        Self::new(self.ordering, false)
    }

    /// Returns the reversed comparison, keeping the unsafe flag.
    pub fn reverse(self) -> Self {
        Self::new(self.ordering.reverse(), self.certain)
    }
}

impl fmt::Display for VersionComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.ordering {
            Ordering::Less => "<",
            Ordering::Equal => "=",
            Ordering::Greater => ">",
        };
        if self.certain {
            write!(f, "{}", symbol)
        } else {
            write!(f, "{} (unsafe)", symbol)
        }
    }
}

/// Outcome of matching a single segment against a (pattern) segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionMatch {
    /// Definitive match, no further segments need to be inspected
    Match,
    /// Definitive mismatch
    Mismatch,
    /// Segments are equal so far, continue with the next ones
    Equal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_unsafe_keeps_ordering() {
        assert_eq!(
            VersionComparison::LESS.with_unsafe(),
            VersionComparison::LESS_UNSAFE
        );
        assert!(VersionComparison::EQUAL_UNSAFE.is_equal());
        assert!(VersionComparison::EQUAL_UNSAFE.is_unsafe());
    }

    #[test]
    fn reverse_keeps_unsafe_flag() {
        assert_eq!(
            VersionComparison::LESS_UNSAFE.reverse(),
            VersionComparison::GREATER_UNSAFE
        );
        assert_eq!(
            VersionComparison::EQUAL.reverse(),
            VersionComparison::EQUAL
        );
    }

    #[test]
    fn display_marks_unsafe_results() {
        assert_eq!(VersionComparison::GREATER.to_string(), ">");
        assert_eq!(VersionComparison::LESS_UNSAFE.to_string(), "< (unsafe)");
    }
}
