//! Operator interaction seam

use crate::error::PromptError;
use crate::plan::BumpPlan;
use sb_core::{DialectSet, Version};

/// Supplies the inputs a bump needs when they were not given explicitly,
/// and confirms the plan before anything is written.
///
/// Runs without a prompter are non-interactive: defaults are taken and the
/// confirmation stage is skipped.
pub trait Prompter {
    /// Choose the target version; `proposed` is the next minor version
    fn new_version(&mut self, current: Version, proposed: Version) -> Result<Version, PromptError>;

    /// Choose the dialects to update out of `available`
    fn dialects(&mut self, available: &DialectSet) -> Result<DialectSet, PromptError>;

    /// Approve the plan; `false` aborts the run without changes
    fn confirm(&mut self, plan: &BumpPlan) -> Result<bool, PromptError>;
}
