//! Tool repository trait for listing installable versions and their CVEs

#[cfg(test)]
use mockall::automock;
use tracing::info;

use crate::error::RepositoryError;
use crate::security::ToolSecurity;
use crate::version::{GenericVersionRange, VersionIdentifier, resolve_version_pattern};

pub mod urls;

pub use urls::UrlRepository;

/// Source of the available versions of a tool edition
#[cfg_attr(test, automock)]
pub trait ToolRepository {
    /// Returns all versions of the tool edition
    ///
    /// # Arguments
    /// * `tool` - The name of the tool (e.g., "java")
    /// * `edition` - The edition of the tool (e.g., "openjdk")
    ///
    /// # Returns
    /// * `Ok(Vec<VersionIdentifier>)` - Versions ordered from newest to oldest
    /// * `Err(RepositoryError)` - If the tool edition is unknown or unreadable
    fn sorted_versions(
        &self,
        tool: &str,
        edition: &str,
    ) -> Result<Vec<VersionIdentifier>, RepositoryError>;

    /// Returns the known vulnerabilities of the tool edition
    fn find_security(&self, tool: &str, edition: &str) -> Result<ToolSecurity, RepositoryError>;
}

/// Resolves the newest version of the tool edition matching `constraint`.
pub fn resolve_tool_version(
    repository: &dyn ToolRepository,
    tool: &str,
    edition: &str,
    constraint: &dyn GenericVersionRange,
) -> Result<VersionIdentifier, RepositoryError> {
    let versions = repository.sorted_versions(tool, edition)?;
    let version = resolve_version_pattern(constraint, &versions)?;
    info!(
        "Resolved {} of {}/{} to {}",
        constraint, tool, edition, version
    );
    Ok(version)
}
