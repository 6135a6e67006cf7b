//! Pairwise combination of two version ranges
//!
//! Sorts the bounds of both ranges once so that relation, union and
//! intersection can be read off directly:
//!
//! ```text
//! min_min ──── max_min ════ min_max ──── max_max
//!          └──── intersection ────┘
//! └─────────────────── union ───────────────────┘
//! ```

use crate::version::boundary::BoundaryType;
use crate::version::identifier::VersionIdentifier;
use crate::version::range::VersionRange;
use crate::version::relation::VersionRangeRelation;

/// One bound of a range; `None` is unbounded and always exclusive.
#[derive(Debug, Clone, Copy)]
struct Bound<'a> {
    version: Option<&'a VersionIdentifier>,
    exclusive: bool,
}

impl<'a> Bound<'a> {
    fn lower(range: &'a VersionRange) -> Self {
        Self {
            version: range.min_version(),
            exclusive: range.is_left_exclusive(),
        }
    }

    fn upper(range: &'a VersionRange) -> Self {
        Self {
            version: range.max_version(),
            exclusive: range.is_right_exclusive(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct VersionRangeCombination<'a> {
    min_min: Bound<'a>,
    max_min: Bound<'a>,
    min_max: Bound<'a>,
    max_max: Bound<'a>,
    relation: VersionRangeRelation,
}

impl<'a> VersionRangeCombination<'a> {
    pub(crate) fn of(first: &'a VersionRange, second: &'a VersionRange) -> Self {
        let (first_min, second_min) = (Bound::lower(first), Bound::lower(second));
        let min_comparison =
            VersionIdentifier::compare_optional(first_min.version, second_min.version, true);
        // equal minimums: the exclusive one is the larger
        let (min_min, max_min) = if min_comparison.is_less()
            || (min_comparison.is_equal() && second_min.exclusive)
        {
            (first_min, second_min)
        } else {
            (second_min, first_min)
        };

        let (first_max, second_max) = (Bound::upper(first), Bound::upper(second));
        let max_comparison =
            VersionIdentifier::compare_optional(first_max.version, second_max.version, false);
        // equal maximums: the exclusive one is the smaller
        let (min_max, max_max) = if max_comparison.is_less()
            || (max_comparison.is_equal() && first_max.exclusive)
        {
            (first_max, second_max)
        } else {
            (second_max, first_max)
        };

        let relation = VersionRangeRelation::of(
            max_min.version,
            max_min.exclusive,
            min_max.version,
            min_max.exclusive,
        );
        Self {
            min_min,
            max_min,
            min_max,
            max_max,
            relation,
        }
    }

    pub(crate) fn relation(&self) -> VersionRangeRelation {
        self.relation
    }

    /// The smallest range covering both, if they relate at least as close as `required`.
    pub(crate) fn union(&self, required: VersionRangeRelation) -> Option<VersionRange> {
        if self.relation < required {
            return None;
        }
        VersionRange::new(
            self.min_min.version.cloned(),
            self.max_max.version.cloned(),
            BoundaryType::of(self.min_min.exclusive, self.max_max.exclusive),
        )
        .ok()
    }

    /// The range of versions contained in both, if any.
    pub(crate) fn intersection(&self) -> Option<VersionRange> {
        let (Some(max_min), Some(min_max)) = (self.max_min.version, self.min_max.version) else {
            if self.max_min.version.is_none() && self.min_max.version.is_none() {
                return Some(VersionRange::unbounded());
            }
            return self.bounded_intersection();
        };
        let comparison = min_max.compare_version(max_min);
        if comparison.is_less() {
            return None;
        }
        if comparison.is_equal() && (self.min_max.exclusive || self.max_min.exclusive) {
            return None;
        }
        self.bounded_intersection()
    }

    fn bounded_intersection(&self) -> Option<VersionRange> {
        VersionRange::new(
            self.max_min.version.cloned(),
            self.min_max.version.cloned(),
            BoundaryType::of(self.max_min.exclusive, self.min_max.exclusive),
        )
        .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn r(range: &str) -> VersionRange {
        range.parse().unwrap()
    }

    #[rstest]
    #[case("[1.0,2.0]", "[2.0,3.0]", VersionRangeRelation::Overlapping)]
    #[case("[1.0,2.1)", "(2.0,3.0]", VersionRangeRelation::Overlapping)]
    #[case("[1.0,2.0)", "[2.0,3.0]", VersionRangeRelation::Connected)]
    #[case("[1.0,2.0]", "(2.0,3.0]", VersionRangeRelation::Connected)]
    #[case("[1.0,2.0)", "(2.0,3.0]", VersionRangeRelation::Disjunct)]
    #[case("[1.0,1.1]", "[1.2,2.0]", VersionRangeRelation::ConnectedLoosely)]
    #[case("[1.0,1.1]", "[1.3,2.0]", VersionRangeRelation::Disjunct)]
    #[case("(,1]", "(,10)", VersionRangeRelation::Overlapping)]
    #[case("(1,)", "(2,)", VersionRangeRelation::Overlapping)]
    #[case("(,)", "(,)", VersionRangeRelation::Overlapping)]
    fn relation_is_symmetric(
        #[case] first: &str,
        #[case] second: &str,
        #[case] expected: VersionRangeRelation,
    ) {
        let (first, second) = (r(first), r(second));
        assert_eq!(VersionRangeCombination::of(&first, &second).relation(), expected);
        assert_eq!(VersionRangeCombination::of(&second, &first).relation(), expected);
    }

    #[rstest]
    #[case("[2,3]", "[3,5]", VersionRangeRelation::Connected, Some("[2,5]"))]
    #[case("[2,3)", "[3,5)", VersionRangeRelation::Connected, Some("[2,5)"))]
    #[case("[2,3)", "(3,5]", VersionRangeRelation::Connected, None)]
    #[case("[1,5]", "[6,9]", VersionRangeRelation::ConnectedLoosely, Some("[1,9]"))]
    #[case("[1,5]", "[6,9]", VersionRangeRelation::Connected, None)]
    #[case("(1,5]", "[1,3)", VersionRangeRelation::Overlapping, Some("[1,5]"))]
    #[case("(1,5)", "(1,5]", VersionRangeRelation::Overlapping, Some("(1,5]"))]
    #[case("(,3]", "[2,)", VersionRangeRelation::Overlapping, Some("(,)"))]
    fn union_respects_required_relation(
        #[case] first: &str,
        #[case] second: &str,
        #[case] required: VersionRangeRelation,
        #[case] expected: Option<&str>,
    ) {
        let (first, second) = (r(first), r(second));
        let expected = expected.map(r);
        assert_eq!(
            VersionRangeCombination::of(&first, &second).union(required),
            expected
        );
        assert_eq!(
            VersionRangeCombination::of(&second, &first).union(required),
            expected
        );
    }

    #[rstest]
    #[case("[2,5]", "[4,8]", Some("[4,5]"))]
    #[case("[2,3)", "(3,5]", None)]
    #[case("[2,3]", "[3,5]", Some("[3,3]"))]
    #[case("[2,3)", "[3,5]", None)]
    #[case("[1,2]", "[4,5]", None)]
    #[case("(1,5]", "[1,3)", Some("(1,3)"))]
    #[case("[1,5)", "[1,5]", Some("[1,5)"))]
    #[case("(,3]", "[2,)", Some("[2,3]"))]
    #[case("(,3]", "(,5)", Some("(,3]"))]
    #[case("[3,)", "(1,)", Some("[3,)"))]
    #[case("(,)", "(,)", Some("(,)"))]
    fn intersection_returns_common_versions(
        #[case] first: &str,
        #[case] second: &str,
        #[case] expected: Option<&str>,
    ) {
        let (first, second) = (r(first), r(second));
        let expected = expected.map(r);
        assert_eq!(
            VersionRangeCombination::of(&first, &second).intersection(),
            expected
        );
        assert_eq!(
            VersionRangeCombination::of(&second, &first).intersection(),
            expected
        );
    }
}
