//! Vulnerability evaluation of tool versions
//!
//! # Modules
//!
//! - [`cve`]: A single CVE with the version ranges it affects
//! - [`tool_security`]: All CVEs of a tool edition, loaded from `security.json`
//! - [`vulnerabilities`]: The CVEs affecting one version, ordered by severity
//! - [`finder`]: Picks the safest latest and nearest versions
//! - [`choice`]: The alternatives offered for a vulnerable version

pub mod choice;
pub mod cve;
pub mod finder;
pub mod tool_security;
pub mod vulnerabilities;

pub use choice::{ChoiceOption, ToolVersionChoice};
pub use cve::{Cve, merge_ranges, merge_version_range};
pub use finder::CveFinder;
pub use tool_security::{SECURITY_FILE, ToolSecurity};
pub use vulnerabilities::ToolVulnerabilities;
