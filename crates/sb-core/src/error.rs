//! Error types for sb-core

use thiserror::Error;

/// Core error type for schemabump
#[derive(Error, Debug)]
pub enum CoreError {
    /// SB001: Version text is not `major.minor.patch`
    #[error("[SB001] Invalid version '{input}': expected major.minor.patch (e.g. 1.2.0)")]
    InvalidVersion { input: String },

    /// SB002: Dialect name outside the supported set
    #[error("[SB002] Unsupported dialect '{name}'. Supported: {supported}")]
    UnsupportedDialect { name: String, supported: String },

    /// SB003: Dialect selection resolved to nothing
    #[error("[SB003] At least one dialect must be selected")]
    EmptyDialectSet,

    /// SB004: Target version does not move forward
    #[error("[SB004] New version {new} must be greater than current version {current}")]
    VersionNotIncreasing { current: String, new: String },

    /// SB005: Failed to parse configuration file
    #[error("[SB005] Failed to parse config {path}: {message}")]
    ConfigParseError { path: String, message: String },

    /// SB007: Explicitly requested configuration file not found
    #[error("[SB007] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// SB008: Configuration value fails validation
    #[error("[SB008] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// SB009: No next minor version fits in a version component
    #[error("[SB009] Cannot propose a version after {version}: minor component overflows")]
    VersionOverflow { version: String },

    /// SB006: IO error with file path context
    #[error("[SB006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
