use std::path::PathBuf;

/// Errors raised while resolving, bumping or writing a version.
///
/// Every variant aborts the invocation before the property list is rewritten.
#[derive(Debug, thiserror::Error)]
pub enum BumpError {
    #[error("Field '{key}' not found in property list")]
    MissingField { key: String },

    #[error("Invalid version '{value}': {reason}")]
    InvalidVersionFormat { value: String, reason: String },

    #[error("App Store lookup failed: {0}")]
    Lookup(String),

    #[error("Invalid property list {}: {message}", .path.display())]
    Document { path: PathBuf, message: String },

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BumpError {
    pub fn invalid_version(value: &str, reason: impl Into<String>) -> Self {
        BumpError::InvalidVersionFormat {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
