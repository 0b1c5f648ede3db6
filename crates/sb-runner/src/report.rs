//! Result of a bump run

use crate::plan::BumpPlan;
use crate::stage::BumpStage;
use sb_artifacts::{ArtifactWarning, FileChange, StepOutcome};
use std::fmt;
use std::path::PathBuf;

/// How a run that reached `Done` ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpOutcome {
    /// Every stage ran
    Completed,
    /// The operator declined the plan; nothing was written
    Aborted,
    /// Dry run; the plan was computed and nothing was written
    Planned,
}

impl fmt::Display for BumpOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpOutcome::Completed => write!(f, "completed"),
            BumpOutcome::Aborted => write!(f, "aborted"),
            BumpOutcome::Planned => write!(f, "planned"),
        }
    }
}

/// Everything a run did: stages reached, files written, warnings raised
#[derive(Debug)]
pub struct BumpReport {
    pub plan: BumpPlan,
    /// Last stage entered
    pub reached: BumpStage,
    pub outcome: BumpOutcome,
    pub changes: Vec<FileChange>,
    pub warnings: Vec<ArtifactWarning>,
    pub reminders: Vec<String>,
}

impl BumpReport {
    pub(crate) fn new(plan: BumpPlan, reached: BumpStage) -> Self {
        Self {
            plan,
            reached,
            outcome: BumpOutcome::Completed,
            changes: Vec::new(),
            warnings: Vec::new(),
            reminders: Vec::new(),
        }
    }

    /// Move to `stage`; stages never go backwards
    pub(crate) fn enter(&mut self, stage: BumpStage) {
        debug_assert!(stage > self.reached, "{stage} after {}", self.reached);
        log::debug!("Entering stage: {stage}");
        self.reached = stage;
    }

    pub(crate) fn finish(&mut self, outcome: BumpOutcome) {
        self.enter(BumpStage::Done);
        self.outcome = outcome;
    }

    pub(crate) fn absorb(&mut self, outcome: StepOutcome) {
        self.changes.extend(outcome.changes);
        self.warnings.extend(outcome.warnings);
        self.reminders.extend(outcome.reminders);
    }

    pub(crate) fn modified(&mut self, path: PathBuf) {
        log::info!("Updated {}", path.display());
        self.changes.push(FileChange::Modified(path));
    }

    pub fn created_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.changes.iter().filter_map(|c| match c {
            FileChange::Created(p) => Some(p),
            FileChange::Modified(_) => None,
        })
    }

    pub fn modified_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.changes.iter().filter_map(|c| match c {
            FileChange::Modified(p) => Some(p),
            FileChange::Created(_) => None,
        })
    }
}
