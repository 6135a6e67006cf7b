use std::fmt;

use crate::security::vulnerabilities::ToolVulnerabilities;
use crate::version::VersionIdentifier;

/// Which candidate a [`ToolVersionChoice`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoiceOption {
    /// The configured version, regardless of its vulnerabilities
    Current,
    /// The safest version with a bias towards the latest
    Latest,
    /// The safest version with a bias towards the configured one
    Nearest,
}

impl fmt::Display for ChoiceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChoiceOption::Current => "current",
            ChoiceOption::Latest => "latest",
            ChoiceOption::Nearest => "nearest",
        };
        f.write_str(name)
    }
}

/// A version offered to the user when the configured one is vulnerable.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolVersionChoice {
    pub version: VersionIdentifier,
    pub option: ChoiceOption,
    pub vulnerabilities: ToolVulnerabilities,
}

impl ToolVersionChoice {
    pub fn is_safe(&self) -> bool {
        self.vulnerabilities.is_empty()
    }
}

impl fmt::Display for ToolVersionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_safe() { "safe" } else { "unsafe" };
        write!(f, "{} ({} - {})", self.option, self.version, state)
    }
}
