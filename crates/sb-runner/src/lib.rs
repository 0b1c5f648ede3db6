//! sb-runner - Bump orchestration for schemabump
//!
//! Drives a schema version bump through a fixed, forward-only sequence of
//! stages (see [`BumpStage`]) and collects what every stage wrote or warned
//! about into a [`BumpReport`].

pub mod error;
pub mod plan;
pub mod prompt;
pub mod report;
pub mod runner;
pub mod stage;

pub use error::{PromptError, RunnerError, RunnerResult};
pub use plan::{BumpPlan, PlannedAction, PlannedFile};
pub use prompt::Prompter;
pub use report::{BumpOutcome, BumpReport};
pub use runner::{BumpRequest, BumpRunner};
pub use stage::BumpStage;
