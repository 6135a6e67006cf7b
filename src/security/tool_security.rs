use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::SecurityError;
use crate::security::cve::Cve;
use crate::version::VersionIdentifier;

/// Name of the security file inside an edition folder of the tool repository
pub const SECURITY_FILE: &str = "security.json";

#[derive(Debug, Default, Deserialize)]
struct SecurityFile {
    #[serde(default)]
    issues: Vec<Cve>,
}

/// Known vulnerabilities of a tool edition.
#[derive(Debug, Clone, Default)]
pub struct ToolSecurity {
    issues: Vec<Cve>,
    path: Option<PathBuf>,
}

impl ToolSecurity {
    pub fn new(issues: Vec<Cve>) -> Self {
        Self { issues, path: None }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the security file, a missing file has no issues.
    pub fn load(path: &Path) -> Result<Self, SecurityError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No security file at {}", path.display());
                return Ok(Self::empty());
            }
            Err(source) => {
                return Err(SecurityError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        let file: SecurityFile =
            serde_json::from_str(&content).map_err(|source| SecurityError::Json {
                path: path.display().to_string(),
                source,
            })?;
        debug!(
            "Loaded {} issue(s) from {}",
            file.issues.len(),
            path.display()
        );
        Ok(Self {
            issues: file.issues,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn issues(&self) -> &[Cve] {
        &self.issues
    }

    /// Returns the issues affecting the version with at least `min_severity`.
    pub fn find_cves(&self, version: &VersionIdentifier, min_severity: f64) -> Vec<&Cve> {
        let cves: Vec<&Cve> = self
            .issues
            .iter()
            .filter(|cve| cve.severity >= min_severity && cve.affects(version))
            .collect();
        if cves.is_empty() && !self.issues.is_empty() {
            debug!(
                "No match for version {} while {} issue(s) are configured in {}",
                version,
                self.issues.len(),
                self.path
                    .as_deref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_default()
            );
        }
        cves
    }
}
