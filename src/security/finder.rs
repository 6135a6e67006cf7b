//! Selection of safe tool versions
//!
//! Scores every candidate by the sum of the severities of the CVEs affecting
//! it plus a penalty of `5 / n` per step away from the starting point, where
//! `n` is the number of candidates. A candidate without any CVE wins
//! immediately.

use tracing::debug;

use crate::security::choice::{ChoiceOption, ToolVersionChoice};
use crate::security::cve::{self, Cve};
use crate::security::tool_security::ToolSecurity;
use crate::security::vulnerabilities::ToolVulnerabilities;
use crate::version::{GenericVersionRange, VersionIdentifier, VersionRange};

const DISTANCE_PENALTY: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct CveFinder {
    /// Candidates sorted in descending order
    versions: Vec<VersionIdentifier>,
    version: VersionIdentifier,
    cves: Vec<Cve>,
    unsafe_intervals: Vec<VersionRange>,
}

impl CveFinder {
    /// Creates a finder for the configured `version`.
    ///
    /// `versions` must be sorted in descending order. If `allowed` is given
    /// only versions it contains are candidates. CVEs below `min_severity`
    /// are ignored.
    pub fn new(
        security: &ToolSecurity,
        versions: &[VersionIdentifier],
        version: VersionIdentifier,
        allowed: Option<&dyn GenericVersionRange>,
        min_severity: f64,
    ) -> Self {
        let versions: Vec<VersionIdentifier> = versions
            .iter()
            .filter(|candidate| allowed.is_none_or(|allowed| allowed.contains(candidate)))
            .cloned()
            .collect();
        let cves: Vec<Cve> = security
            .issues()
            .iter()
            .filter(|cve| cve.severity >= min_severity)
            .cloned()
            .collect();
        let unsafe_intervals =
            cve::merge_ranges(cves.iter().flat_map(|cve| cve.versions.iter().cloned()));
        debug!(
            "Evaluating {} candidate version(s) against {} CVE(s)",
            versions.len(),
            cves.len()
        );
        Self {
            versions,
            version,
            cves,
            unsafe_intervals,
        }
    }

    pub fn version(&self) -> &VersionIdentifier {
        &self.version
    }

    pub fn versions(&self) -> &[VersionIdentifier] {
        &self.versions
    }

    /// The CVEs affecting the given version, each at most once.
    pub fn cves_of(&self, version: &VersionIdentifier) -> Vec<&Cve> {
        self.cves.iter().filter(|cve| cve.affects(version)).collect()
    }

    pub fn vulnerabilities(&self, version: &VersionIdentifier) -> ToolVulnerabilities {
        ToolVulnerabilities::of(self.cves_of(version).into_iter().cloned().collect())
    }

    fn severity_sum(&self, version: &VersionIdentifier) -> f64 {
        Cve::severity_sum(self.cves_of(version))
    }

    fn penalty(&self) -> f64 {
        DISTANCE_PENALTY / self.versions.len() as f64
    }

    /// The safest version searching from the latest one downwards.
    ///
    /// Returns `None` if there are no candidates.
    pub fn safest_latest_version(&self) -> Option<VersionIdentifier> {
        let first = self.versions.first()?;
        let penalty = self.penalty();
        let mut safest = first;
        let mut safest_score = self.severity_sum(first);
        for (distance, candidate) in self.versions.iter().enumerate() {
            let severity = self.severity_sum(candidate);
            if severity == 0.0 {
                return Some(candidate.clone());
            }
            let score = severity + penalty * distance as f64;
            if safest_score >= score {
                safest = candidate;
                safest_score = score;
            }
        }
        Some(safest.clone())
    }

    /// The safest version searching outwards from the configured one.
    ///
    /// At each distance the older neighbour is checked before the newer one.
    pub fn safest_nearest_version(&self) -> VersionIdentifier {
        let mut safest = &self.version;
        let mut safest_score = self.severity_sum(&self.version);
        if safest_score == 0.0 || self.versions.is_empty() {
            return safest.clone();
        }
        let penalty = self.penalty();
        let (start, present) = match self.versions.iter().position(|v| v == &self.version) {
            Some(index) => (index, true),
            None => (
                self.versions
                    .partition_point(|candidate| candidate.is_greater(&self.version)),
                false,
            ),
        };
        for distance in 1..=self.versions.len() {
            let older = if present {
                start + distance
            } else {
                start + distance - 1
            };
            let older = self.versions.get(older);
            let newer = start
                .checked_sub(distance)
                .and_then(|index| self.versions.get(index));
            if older.is_none() && newer.is_none() {
                break;
            }
            for candidate in [older, newer].into_iter().flatten() {
                let severity = self.severity_sum(candidate);
                if severity == 0.0 {
                    return candidate.clone();
                }
                let score = severity + penalty * distance as f64;
                if safest_score >= score {
                    safest = candidate;
                    safest_score = score;
                }
            }
        }
        safest.clone()
    }

    /// All CVE ranges merged into the minimal set of disjoint intervals.
    pub fn unsafe_intervals(&self) -> &[VersionRange] {
        &self.unsafe_intervals
    }

    pub fn is_safe(&self, version: &VersionIdentifier) -> bool {
        !self
            .unsafe_intervals
            .iter()
            .any(|interval| interval.contains(version))
    }

    /// The lowest candidate above `version` outside of every unsafe interval.
    pub fn nearest_safe_version_above(
        &self,
        version: &VersionIdentifier,
    ) -> Option<VersionIdentifier> {
        self.versions
            .iter()
            .rev()
            .filter(|candidate| candidate.is_greater(version))
            .find(|candidate| self.is_safe(candidate))
            .cloned()
    }

    fn choice(&self, version: VersionIdentifier, option: ChoiceOption) -> ToolVersionChoice {
        let vulnerabilities = self.vulnerabilities(&version);
        ToolVersionChoice {
            version,
            option,
            vulnerabilities,
        }
    }

    /// The configured version followed by the safest latest and nearest
    /// alternatives, skipping alternatives already offered.
    pub fn choices(&self) -> Vec<ToolVersionChoice> {
        let mut choices = vec![self.choice(self.version.clone(), ChoiceOption::Current)];
        let alternatives = [
            (self.safest_latest_version(), ChoiceOption::Latest),
            (Some(self.safest_nearest_version()), ChoiceOption::Nearest),
        ];
        for (version, option) in alternatives {
            let Some(version) = version else {
                continue;
            };
            if choices.iter().all(|choice| choice.version != version) {
                choices.push(self.choice(version, option));
            }
        }
        choices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn v(version: &str) -> VersionIdentifier {
        VersionIdentifier::of(version).unwrap()
    }

    fn descending(count: u32) -> Vec<VersionIdentifier> {
        (1..=count).rev().map(|i| v(&i.to_string())).collect()
    }

    fn security(cves: &[(&str, f64, &str)]) -> ToolSecurity {
        ToolSecurity::new(
            cves.iter()
                .map(|(id, severity, range)| Cve::new(*id, *severity, vec![range.parse().unwrap()]))
                .collect(),
        )
    }

    fn finder(cves: &[(&str, f64, &str)], current: &str) -> CveFinder {
        CveFinder::new(&security(cves), &descending(9), v(current), None, 0.0)
    }

    #[test]
    fn unsafe_intervals_merge_adjacent_ranges() {
        let finder = finder(&[("A", 5.0, "[1,5]"), ("B", 5.0, "[6,9]")], "3");

        assert_eq!(finder.unsafe_intervals(), &["[1,9]".parse::<VersionRange>().unwrap()]);
        assert!(finder.versions().iter().all(|version| !finder.is_safe(version)));
        assert_eq!(finder.nearest_safe_version_above(&v("3")), None);
    }

    #[rstest]
    #[case("1", true)]
    #[case("2", true)]
    #[case("3", false)]
    #[case("4", true)]
    #[case("5", true)]
    #[case("6", false)]
    #[case("7", false)]
    #[case("8", true)]
    #[case("9", true)]
    fn is_safe_checks_merged_intervals(#[case] version: &str, #[case] expected: bool) {
        let finder = finder(&[("A", 5.0, "[3,3]"), ("B", 5.0, "[6,7]")], "3");

        assert_eq!(finder.is_safe(&v(version)), expected);
    }

    #[test]
    fn nearest_safe_version_above_skips_unsafe_versions() {
        let finder = finder(&[("A", 5.0, "[3,3]"), ("B", 5.0, "[6,7]")], "3");

        assert_eq!(finder.nearest_safe_version_above(&v("3")), Some(v("4")));
        assert_eq!(finder.nearest_safe_version_above(&v("5")), Some(v("8")));
        assert_eq!(finder.nearest_safe_version_above(&v("9")), None);
    }

    #[test]
    fn cves_of_respects_min_severity() {
        let cves = security(&[("A", 2.0, "[1,5]"), ("B", 8.0, "[3,4]")]);
        let finder = CveFinder::new(&cves, &descending(9), v("3"), None, 5.0);

        let ids: Vec<&str> = finder.cves_of(&v("3")).iter().map(|cve| cve.id.as_str()).collect();

        assert_eq!(ids, vec!["B"]);
        assert!(finder.is_safe(&v("1")));
    }

    #[test]
    fn safest_latest_version_returns_latest_safe_version() {
        let finder = finder(&[("A", 5.0, "[3,3]"), ("B", 5.0, "[8,9]")], "3");

        assert_eq!(finder.safest_latest_version(), Some(v("7")));
    }

    #[test]
    fn safest_latest_version_weighs_severity_against_distance() {
        let finder = finder(&[("A", 5.0, "[1,5]"), ("B", 2.0, "[6,9]")], "3");

        assert_eq!(finder.safest_latest_version(), Some(v("9")));
    }

    #[test]
    fn safest_nearest_version_prefers_older_neighbour() {
        let finder = finder(&[("A", 5.0, "[3,3]"), ("B", 5.0, "[6,7]")], "3");

        assert_eq!(finder.safest_nearest_version(), v("2"));
    }

    #[test]
    fn safest_nearest_version_weighs_severity_against_distance() {
        let finder = finder(&[("A", 5.0, "[1,5]"), ("B", 2.0, "[6,9]")], "3");

        assert_eq!(finder.safest_nearest_version(), v("6"));
    }

    #[test]
    fn safest_nearest_version_keeps_safe_current_version() {
        let finder = finder(&[("A", 5.0, "[6,7]")], "3");

        assert_eq!(finder.safest_nearest_version(), v("3"));
    }

    #[test]
    fn safest_nearest_version_starts_at_insertion_point_of_unknown_version() {
        let finder = finder(&[("A", 5.0, "[5,6]")], "5.5");

        assert_eq!(finder.safest_nearest_version(), v("4"));
    }

    #[test]
    fn new_filters_candidates_by_allowed_range() {
        let allowed: VersionRange = "[2,4]".parse().unwrap();
        let finder = CveFinder::new(
            &security(&[("A", 5.0, "[3,3]")]),
            &descending(9),
            v("3"),
            Some(&allowed),
            0.0,
        );

        assert_eq!(finder.versions(), &[v("4"), v("3"), v("2")]);
        assert_eq!(finder.safest_latest_version(), Some(v("4")));
    }

    #[test]
    fn choices_offer_distinct_alternatives() {
        let finder = finder(&[("A", 5.0, "[3,3]"), ("B", 5.0, "[6,7]")], "3");

        let choices: Vec<String> = finder.choices().iter().map(ToString::to_string).collect();

        assert_eq!(
            choices,
            vec![
                "current (3 - unsafe)",
                "latest (9 - safe)",
                "nearest (2 - safe)"
            ]
        );
    }

    #[test]
    fn choices_skip_alternatives_equal_to_current() {
        let finder = finder(&[], "9");

        let choices = finder.choices();

        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].option, ChoiceOption::Current);
        assert!(choices[0].is_safe());
    }
}
