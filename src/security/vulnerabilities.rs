use std::cmp::Ordering;
use std::fmt;

use crate::security::cve::Cve;
use crate::version::VersionIdentifier;

/// The vulnerabilities affecting one tool version.
///
/// Ordered by maximum severity and then by the sum of all severities, so a
/// smaller value is safer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolVulnerabilities {
    issues: Vec<Cve>,
    max_severity: f64,
    severity_sum: f64,
}

impl ToolVulnerabilities {
    pub fn of(issues: Vec<Cve>) -> Self {
        let max_severity = issues
            .iter()
            .map(|cve| cve.severity)
            .fold(0.0, f64::max);
        let severity_sum = Cve::severity_sum(&issues);
        Self {
            issues,
            max_severity,
            severity_sum,
        }
    }

    pub fn issues(&self) -> &[Cve] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn max_severity(&self) -> f64 {
        self.max_severity
    }

    pub fn severity_sum(&self) -> f64 {
        self.severity_sum
    }

    pub fn compare(&self, other: &ToolVulnerabilities) -> Ordering {
        self.max_severity
            .total_cmp(&other.max_severity)
            .then_with(|| self.severity_sum.total_cmp(&other.severity_sum))
    }

    pub fn is_safer(&self, other: &ToolVulnerabilities) -> bool {
        self.compare(other).is_lt()
    }

    pub fn is_safer_or_equal(&self, other: &ToolVulnerabilities) -> bool {
        self.compare(other).is_le()
    }

    /// Human readable summary naming the affected tool version.
    pub fn describe(&self, tool: &str, version: &VersionIdentifier) -> String {
        self.render(Some((tool, version)))
    }

    fn render(&self, target: Option<(&str, &VersionIdentifier)>) -> String {
        let mut message = if self.issues.is_empty() {
            "No CVEs found".to_string()
        } else {
            format!("Found {} CVE(s)", self.issues.len())
        };
        if let Some((tool, version)) = target {
            message.push_str(&format!(" for version {} of tool {}", version, tool));
        }
        message.push(if self.issues.is_empty() { '.' } else { ':' });
        for issue in &self.issues {
            message.push('\n');
            message.push_str(&issue.to_string());
        }
        message
    }
}

impl fmt::Display for ToolVulnerabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn vulnerabilities(severities: &[f64]) -> ToolVulnerabilities {
        ToolVulnerabilities::of(
            severities
                .iter()
                .enumerate()
                .map(|(i, severity)| Cve::new(format!("CVE-{}", i), *severity, vec![]))
                .collect(),
        )
    }

    #[test]
    fn of_computes_max_and_sum() {
        let result = vulnerabilities(&[2.0, 7.5, 1.0]);
        assert_eq!(result.max_severity(), 7.5);
        assert_eq!(result.severity_sum(), 10.5);
    }

    #[rstest]
    #[case(&[], &[1.0], Ordering::Less)]
    #[case(&[5.0], &[4.0, 4.0], Ordering::Greater)]
    #[case(&[5.0, 1.0], &[5.0, 2.0], Ordering::Less)]
    #[case(&[5.0, 1.0], &[1.0, 5.0], Ordering::Equal)]
    fn compare_uses_max_then_sum(
        #[case] left: &[f64],
        #[case] right: &[f64],
        #[case] expected: Ordering,
    ) {
        assert_eq!(
            vulnerabilities(left).compare(&vulnerabilities(right)),
            expected
        );
    }

    #[test]
    fn is_safer_is_strict() {
        let low = vulnerabilities(&[1.0]);
        let same = vulnerabilities(&[1.0]);
        assert!(!low.is_safer(&same));
        assert!(low.is_safer_or_equal(&same));
        assert!(ToolVulnerabilities::default().is_safer(&low));
    }

    #[test]
    fn describe_lists_issues() {
        let version = VersionIdentifier::of("1.2").unwrap();

        assert_eq!(
            ToolVulnerabilities::default().describe("java", &version),
            "No CVEs found for version 1.2 of tool java."
        );

        let found = ToolVulnerabilities::of(vec![Cve::new(
            "CVE-1",
            4.0,
            vec!["[1.0,2.0)".parse().unwrap()],
        )]);
        assert_eq!(
            found.describe("java", &version),
            "Found 1 CVE(s) for version 1.2 of tool java:\nCVE-1 (severity 4): [1.0,2.0)"
        );
        assert_eq!(found.to_string(), "Found 1 CVE(s):\nCVE-1 (severity 4): [1.0,2.0)");
    }
}
