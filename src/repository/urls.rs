//! Tool repository backed by a local directory tree
//!
//! ```text
//! <root>/<tool>/<edition>/<version>/
//! <root>/<tool>/<edition>/security.json
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::RepositoryError;
use crate::repository::ToolRepository;
use crate::security::{SECURITY_FILE, ToolSecurity};
use crate::version::VersionIdentifier;

#[derive(Debug, Clone)]
pub struct UrlRepository {
    root: PathBuf,
}

impl UrlRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn edition_dir(&self, tool: &str, edition: &str) -> PathBuf {
        self.root.join(tool).join(edition)
    }
}

impl ToolRepository for UrlRepository {
    fn sorted_versions(
        &self,
        tool: &str,
        edition: &str,
    ) -> Result<Vec<VersionIdentifier>, RepositoryError> {
        let dir = self.edition_dir(tool, edition);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RepositoryError::ToolNotFound {
                    tool: tool.to_string(),
                    edition: edition.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                warn!("Skipping non UTF-8 entry in {}", dir.display());
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            match VersionIdentifier::of(name) {
                Some(version) => versions.push(version),
                None => debug!("Skipping unparsable version folder {}", name),
            }
        }
        versions.sort_by(|a, b| b.cmp(a));
        debug!(
            "Found {} version(s) of {}/{} in {}",
            versions.len(),
            tool,
            edition,
            dir.display()
        );
        Ok(versions)
    }

    fn find_security(&self, tool: &str, edition: &str) -> Result<ToolSecurity, RepositoryError> {
        let path = self.edition_dir(tool, edition).join(SECURITY_FILE);
        Ok(ToolSecurity::load(&path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(versions: &[&str]) -> (TempDir, UrlRepository) {
        let temp_dir = TempDir::new().unwrap();
        let edition = temp_dir.path().join("java").join("openjdk");
        for version in versions {
            fs::create_dir_all(edition.join(version)).unwrap();
        }
        let repository = UrlRepository::new(temp_dir.path());
        (temp_dir, repository)
    }

    #[test]
    fn sorted_versions_returns_descending_versions() {
        let (_temp_dir, repository) = setup(&["17.0.9", "21.0.1", "17.0.10", "21.0.1-rc1"]);

        let versions: Vec<String> = repository
            .sorted_versions("java", "openjdk")
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(versions, vec!["21.0.1", "21.0.1-rc1", "17.0.10", "17.0.9"]);
    }

    #[test]
    fn sorted_versions_skips_hidden_files_and_unparsable_entries() {
        let (temp_dir, repository) = setup(&["17.0.9", ".cache", "not valid"]);
        fs::write(
            temp_dir.path().join("java/openjdk").join(SECURITY_FILE),
            r#"{"issues":[]}"#,
        )
        .unwrap();

        let versions = repository.sorted_versions("java", "openjdk").unwrap();

        assert_eq!(versions, vec![VersionIdentifier::of("17.0.9").unwrap()]);
    }

    #[test]
    fn sorted_versions_fails_for_unknown_tool() {
        let (_temp_dir, repository) = setup(&["17.0.9"]);

        let result = repository.sorted_versions("java", "graalvm");

        assert!(matches!(
            result,
            Err(RepositoryError::ToolNotFound { tool, edition })
                if tool == "java" && edition == "graalvm"
        ));
    }

    #[test]
    fn find_security_loads_security_file() {
        let (temp_dir, repository) = setup(&["17.0.9"]);
        fs::write(
            temp_dir.path().join("java/openjdk").join(SECURITY_FILE),
            r#"{"issues":[{"id":"CVE-2024-20918","severity":7.4,"versions":["[17,17.0.10)"]}]}"#,
        )
        .unwrap();

        let security = repository.find_security("java", "openjdk").unwrap();

        assert_eq!(security.issues().len(), 1);
        assert_eq!(
            security
                .find_cves(&VersionIdentifier::of("17.0.9").unwrap(), 0.0)
                .len(),
            1
        );
    }

    #[test]
    fn find_security_without_file_is_empty() {
        let (_temp_dir, repository) = setup(&["17.0.9"]);

        let security = repository.find_security("java", "openjdk").unwrap();

        assert!(security.issues().is_empty());
    }
}
