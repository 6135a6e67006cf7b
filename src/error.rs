use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Unparsable version: {0:?}")]
    Unparsable(String),

    #[error("Invalid version range: {0}")]
    InvalidRange(String),

    #[error("Cannot increment version pattern: {0}")]
    PatternIncrement(String),

    #[error("Version number too large to increment: {0}")]
    IncrementOverflow(String),

    #[error(
        "Could not find any version matching '{constraint}' - there are {available} version(s) available but none matched!"
    )]
    NoMatchingVersion { constraint: String, available: usize },
}

#[derive(Debug, Error)]
pub enum SecurityError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot merge {left} with {right}: {reason}")]
    CveMismatch {
        left: String,
        right: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tool not found: {tool}/{edition}")]
    ToolNotFound { tool: String, edition: String },

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Security(#[from] SecurityError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
