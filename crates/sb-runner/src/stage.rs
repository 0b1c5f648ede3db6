//! Stages of a bump

use std::fmt;

/// One state of the bump state machine, in execution order.
///
/// A run only ever moves forward through these stages; there is no retry
/// or rollback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BumpStage {
    ResolveVersions,
    SelectDialects,
    ConfirmPlan,
    ApplyPerDialect,
    UpdatePrimaryProperties,
    SyncChangelog,
    CloneFixture,
    UpdateSecondaryProperty,
    Done,
}

impl BumpStage {
    /// Whether any file may have been written once this stage is reached
    pub fn mutates(self) -> bool {
        self >= BumpStage::ApplyPerDialect && self != BumpStage::Done
    }
}

impl fmt::Display for BumpStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpStage::ResolveVersions => "resolve versions",
            BumpStage::SelectDialects => "select dialects",
            BumpStage::ConfirmPlan => "confirm plan",
            BumpStage::ApplyPerDialect => "apply per-dialect scripts",
            BumpStage::UpdatePrimaryProperties => "update version properties",
            BumpStage::SyncChangelog => "sync changelog",
            BumpStage::CloneFixture => "clone test fixture",
            BumpStage::UpdateSecondaryProperty => "update engine dependency property",
            BumpStage::Done => "done",
        };
        f.write_str(name)
    }
}
