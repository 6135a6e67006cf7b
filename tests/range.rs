use rstest::rstest;
use tool_version::version::{
    BoundaryType, VersionIdentifier, VersionRange, VersionRangeRelation,
};

fn v(version: &str) -> VersionIdentifier {
    VersionIdentifier::of(version).unwrap()
}

fn r(range: &str) -> VersionRange {
    range.parse().unwrap()
}

#[rstest]
#[case("[1.2,3]")]
#[case("[1,)")]
#[case("(1.2,3.4]")]
#[case("(,3)")]
#[case("(,)")]
#[case("[8u302b08,11.0.14_9]")]
fn ranges_round_trip(#[case] range: &str) {
    let parsed = r(range);

    assert_eq!(parsed.to_string(), range);
    assert_eq!(r(&parsed.to_string()), parsed);
}

#[test]
fn parse_reads_bounds_and_boundary_type() {
    let closed = r("1.2,3");
    assert_eq!(closed.min_version(), Some(&v("1.2")));
    assert_eq!(closed.max_version(), Some(&v("3")));
    assert_eq!(closed.boundary_type(), BoundaryType::Closed);

    let open_end = r("1,)");
    assert_eq!(open_end.min_version(), Some(&v("1")));
    assert_eq!(open_end.max_version(), None);
    assert!(!open_end.is_left_exclusive());
    assert!(open_end.is_right_exclusive());

    let left_open = r("(1.2,3.4]");
    assert_eq!(left_open.boundary_type(), BoundaryType::LeftOpen);
}

#[rstest]
#[case("[1.2,", "(1.2,)", false)]
#[case("(1.2,", "(1.2,)", true)]
#[case("[1.2,3", "1.2,3]", true)]
#[case("[,)", "(,]", true)]
#[case("1.2,", "1,", false)]
#[case("1.2,3", ",3", false)]
#[case("8u302b08,11.0.14_9", "(8u302b08,11.0.14_9)", false)]
fn equality_depends_on_bounds_and_exclusivity(
    #[case] left: &str,
    #[case] right: &str,
    #[case] expected: bool,
) {
    assert_eq!(r(left) == r(right), expected, "{left} == {right}");
}

#[rstest]
#[case("[1,5]", "1", true)]
#[case("[1,5]", "5", true)]
#[case("(1,5)", "1", false)]
#[case("(1,5)", "5", false)]
#[case("(1,5)", "3", true)]
#[case("(,5]", "0.1", true)]
#[case("(,5]", "5", true)]
#[case("(,5]", "5.1", false)]
fn contains_is_exact_at_boundaries(
    #[case] range: &str,
    #[case] version: &str,
    #[case] expected: bool,
) {
    assert_eq!(r(range).contains(&v(version)), expected);
}

#[test]
fn union_of_touching_ranges() {
    let union = r("[2,3]").union(&r("[3,5]"), VersionRangeRelation::Connected);

    assert_eq!(union, Some(r("[2,5]")));
}

#[test]
fn union_requires_relation() {
    let left = r("[1,5]");
    let right = r("[6,9]");

    assert_eq!(left.relation(&right), VersionRangeRelation::ConnectedLoosely);
    assert_eq!(left.union(&right, VersionRangeRelation::Connected), None);
    assert_eq!(
        left.union(&right, VersionRangeRelation::ConnectedLoosely),
        Some(r("[1,9]"))
    );
}

#[rstest]
#[case("[2,5]", "[4,8]", Some("[4,5]"))]
#[case("[2,3)", "(3,5]", None)]
#[case("[2,3]", "[3,5]", Some("[3,3]"))]
#[case("(,)", "(,)", Some("(,)"))]
#[case("(,4]", "[2,)", Some("[2,4]"))]
#[case("[1,2]", "[3,4]", None)]
fn intersection_of_ranges(#[case] left: &str, #[case] right: &str, #[case] expected: Option<&str>) {
    let expected = expected.map(r);

    assert_eq!(r(left).intersection(&r(right)), expected);
    assert_eq!(r(right).intersection(&r(left)), expected);
}

#[test]
fn sort_ranges_by_minimum() {
    let mut ranges = vec![r("[1.2,3]"), r("[1.2.1,3]"), r("[1.1.2,3]")];

    ranges.sort();

    assert_eq!(ranges, vec![r("[1.1.2,3]"), r("[1.2,3]"), r("[1.2.1,3]")]);
}
