//! Error types for sb-artifacts

use thiserror::Error;

/// Fatal artifact errors. Recoverable conditions are reported as
/// [`crate::ArtifactWarning`] instead.
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// SA001: A required document does not exist
    #[error("[SA001] Required document not found: {path}")]
    DocumentNotFound { path: String },

    /// SA002: Property element missing from a document
    #[error("[SA002] Property '{key}' not found in {path}")]
    PropertyNotFound { key: String, path: String },

    /// SA003: Document is not well-formed XML
    #[error("[SA003] Failed to parse XML in {path}: {message}")]
    XmlParse { path: String, message: String },

    /// SA004: Changelog has no closing root element
    #[error("[SA004] Closing marker not found in changelog {path}: {detail}")]
    MarkerNotFound { path: String, detail: String },

    /// SA005: IO error with file path context
    #[error("[SA005] IO error on '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

impl ArtifactError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        ArtifactError::IoWithPath {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Result type alias for ArtifactError
pub type ArtifactResult<T> = Result<T, ArtifactError>;
