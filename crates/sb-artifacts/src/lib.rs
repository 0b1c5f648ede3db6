//! sb-artifacts - Artifact editors for schemabump
//!
//! Each module edits one kind of file touched by a schema version bump. All
//! editors splice exact byte ranges into the original text so that content
//! outside the edited value is preserved byte for byte.

pub mod changelog;
pub mod dialect_updater;
pub mod error;
pub mod fixture;
pub mod outcome;
pub mod property;
pub mod schema_log;
pub mod sql;

pub use changelog::ChangelogSynchronizer;
pub use dialect_updater::DialectUpdater;
pub use error::{ArtifactError, ArtifactResult};
pub use fixture::FixtureCloner;
pub use outcome::{ArtifactWarning, FileChange, StepOutcome, WarningKind};
pub use property::{get_property, set_property, PropertyDocument};
pub use schema_log::{bootstrap_version, extract_entry, extract_id, SchemaLogEntry};
