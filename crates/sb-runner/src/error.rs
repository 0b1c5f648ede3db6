//! Error types for sb-runner

use crate::stage::BumpStage;
use sb_artifacts::ArtifactError;
use sb_core::CoreError;
use thiserror::Error;

/// Failure while asking the operator for input
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("failed to read operator input: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

/// A fatal error, tagged with the stage the run had reached
#[derive(Error, Debug)]
pub enum RunnerError {
    /// SR001: Invalid input (version, dialect, ordering)
    #[error("[SR001] {stage}: {source}")]
    Core {
        stage: BumpStage,
        #[source]
        source: CoreError,
    },

    /// SR002: Required document, property or marker missing, or I/O failure
    #[error("[SR002] {stage}: {source}")]
    Artifact {
        stage: BumpStage,
        #[source]
        source: ArtifactError,
    },

    /// SR003: Operator input could not be read or was invalid
    #[error("[SR003] {stage}: {source}")]
    Prompt {
        stage: BumpStage,
        #[source]
        source: PromptError,
    },

    /// SR004: A stored version property does not hold a valid version
    #[error("[SR004] {stage}: property '{key}' in {path}: {source}")]
    InvalidStoredVersion {
        stage: BumpStage,
        key: String,
        path: String,
        #[source]
        source: CoreError,
    },
}

impl RunnerError {
    /// Stage in which the run stopped
    pub fn stage(&self) -> BumpStage {
        match self {
            RunnerError::Core { stage, .. }
            | RunnerError::Artifact { stage, .. }
            | RunnerError::Prompt { stage, .. }
            | RunnerError::InvalidStoredVersion { stage, .. } => *stage,
        }
    }
}

/// Result type alias for RunnerError
pub type RunnerResult<T> = Result<T, RunnerError>;
