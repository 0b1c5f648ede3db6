//! Outcomes and warnings of individual artifact steps

use sb_core::Dialect;
use std::fmt;
use std::path::{Path, PathBuf};

/// A file written by a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Created(PathBuf),
    Modified(PathBuf),
}

impl FileChange {
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Created(p) | FileChange::Modified(p) => p,
        }
    }
}

/// Classification of a recoverable condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A file or directory the step works on is absent, or its target
    /// already exists
    ArtifactMissing,
    /// A file is present but the string the step edits is not in it
    EmbeddedMarkerNotFound,
}

/// A recoverable condition: the affected artifact is skipped, the run goes on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactWarning {
    BootstrapMissing {
        dialect: Dialect,
        path: PathBuf,
    },
    BootstrapRowMissing {
        dialect: Dialect,
        path: PathBuf,
    },
    UpgradeSourceMissing {
        dialect: Dialect,
        path: PathBuf,
    },
    SchemaLogEntryMissing {
        dialect: Dialect,
        path: PathBuf,
        version: String,
    },
    UpgradeTargetExists {
        dialect: Dialect,
        path: PathBuf,
    },
    SchemaLogIdOverflow {
        dialect: Dialect,
        path: PathBuf,
        id: u64,
    },
    FixtureSourceMissing {
        path: PathBuf,
    },
    FixtureTargetExists {
        path: PathBuf,
    },
    FixtureConstantFileMissing {
        path: PathBuf,
    },
    FixtureConstantNotFound {
        path: PathBuf,
        constant: String,
        expected: String,
        found: Option<String>,
    },
}

impl ArtifactWarning {
    pub fn kind(&self) -> WarningKind {
        match self {
            ArtifactWarning::BootstrapMissing { .. }
            | ArtifactWarning::UpgradeSourceMissing { .. }
            | ArtifactWarning::UpgradeTargetExists { .. }
            | ArtifactWarning::FixtureSourceMissing { .. }
            | ArtifactWarning::FixtureTargetExists { .. }
            | ArtifactWarning::FixtureConstantFileMissing { .. } => WarningKind::ArtifactMissing,
            ArtifactWarning::BootstrapRowMissing { .. }
            | ArtifactWarning::SchemaLogEntryMissing { .. }
            | ArtifactWarning::SchemaLogIdOverflow { .. }
            | ArtifactWarning::FixtureConstantNotFound { .. } => {
                WarningKind::EmbeddedMarkerNotFound
            }
        }
    }
}

impl fmt::Display for ArtifactWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactWarning::BootstrapMissing { dialect, path } => write!(
                f,
                "[{dialect}] bootstrap script not found, skipping: {}",
                path.display()
            ),
            ArtifactWarning::BootstrapRowMissing { dialect, path } => write!(
                f,
                "[{dialect}] no schema log row with id 0 in {}, left unchanged",
                path.display()
            ),
            ArtifactWarning::UpgradeSourceMissing { dialect, path } => write!(
                f,
                "[{dialect}] previous upgrade script not found, no new upgrade script created: {}",
                path.display()
            ),
            ArtifactWarning::SchemaLogEntryMissing {
                dialect,
                path,
                version,
            } => write!(
                f,
                "[{dialect}] no schema log entry for {version} in {}, no new upgrade script created",
                path.display()
            ),
            ArtifactWarning::UpgradeTargetExists { dialect, path } => write!(
                f,
                "[{dialect}] upgrade script already exists, not overwritten: {}",
                path.display()
            ),
            ArtifactWarning::SchemaLogIdOverflow { dialect, path, id } => write!(
                f,
                "[{dialect}] schema log id {id} in {} leaves no room for the next step, no new upgrade script created",
                path.display()
            ),
            ArtifactWarning::FixtureSourceMissing { path } => write!(
                f,
                "fixture source directory not found, fixture not cloned: {}",
                path.display()
            ),
            ArtifactWarning::FixtureTargetExists { path } => write!(
                f,
                "fixture directory already exists, not overwritten: {}",
                path.display()
            ),
            ArtifactWarning::FixtureConstantFileMissing { path } => write!(
                f,
                "fixture copied but version constant file not found: {}",
                path.display()
            ),
            ArtifactWarning::FixtureConstantNotFound {
                path,
                constant,
                expected,
                found,
            } => match found {
                Some(found) => write!(
                    f,
                    "{constant} in {} is \"{found}\", expected \"{expected}\"; left unchanged",
                    path.display()
                ),
                None => write!(
                    f,
                    "{constant} declaration not found in {}",
                    path.display()
                ),
            },
        }
    }
}

/// Files written and warnings raised by one step
#[derive(Debug, Default)]
pub struct StepOutcome {
    pub changes: Vec<FileChange>,
    pub warnings: Vec<ArtifactWarning>,
    /// Follow-up actions the operator has to take by hand
    pub reminders: Vec<String>,
}

impl StepOutcome {
    pub(crate) fn created(&mut self, path: PathBuf) {
        log::info!("Created {}", path.display());
        self.changes.push(FileChange::Created(path));
    }

    pub(crate) fn modified(&mut self, path: PathBuf) {
        log::info!("Updated {}", path.display());
        self.changes.push(FileChange::Modified(path));
    }

    pub(crate) fn warn(&mut self, warning: ArtifactWarning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub(crate) fn remind(&mut self, reminder: String) {
        log::info!("{reminder}");
        self.reminders.push(reminder);
    }

    /// Append another step's results
    pub fn merge(&mut self, other: StepOutcome) {
        self.changes.extend(other.changes);
        self.warnings.extend(other.warnings);
        self.reminders.extend(other.reminders);
    }

    /// Whether nothing was written
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}
