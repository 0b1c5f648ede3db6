//! The set of file operations a bump intends to perform

use sb_core::{DialectSet, Layout, VersionTriple};
use std::fmt;
use std::path::PathBuf;

/// What a bump intends to do with one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedAction {
    Create,
    Modify,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub action: PlannedAction,
    pub path: PathBuf,
    /// Short description of the edit, shown next to the path
    pub detail: String,
}

/// Resolved inputs of a bump plus the files it will touch
#[derive(Debug, Clone)]
pub struct BumpPlan {
    pub versions: VersionTriple,
    pub dialects: DialectSet,
    pub files: Vec<PlannedFile>,
    root: PathBuf,
}

impl BumpPlan {
    /// Compute the plan for `versions` over `dialects`.
    ///
    /// Files are listed in the order the stages touch them. Whether each
    /// file actually exists is only checked when the stage runs.
    pub fn new(layout: &Layout, versions: VersionTriple, dialects: DialectSet) -> Self {
        let config = layout.config();
        let current = versions.current.to_string();
        let new = versions.new.to_string();
        let current_minor = versions.current.minor_form();
        let new_minor = versions.new.minor_form();
        let mut files = Vec::new();

        for dialect in dialects.iter() {
            files.push(PlannedFile {
                action: PlannedAction::Modify,
                path: layout.bootstrap_script(dialect),
                detail: format!("schema log version -> {new}"),
            });
            files.push(PlannedFile {
                action: PlannedAction::Create,
                path: layout.upgrade_script(dialect, &current_minor, &new_minor),
                detail: format!("{} row for {new}", config.sql.schema_log_table),
            });
        }

        files.push(PlannedFile {
            action: PlannedAction::Modify,
            path: layout.version_store(),
            detail: format!(
                "{} = {new}, {} = {current}",
                config.version_store.current_key, config.version_store.previous_key
            ),
        });
        files.push(PlannedFile {
            action: PlannedAction::Modify,
            path: layout.changelog(),
            detail: format!("change-sets {current_minor}-to-{new_minor} and {new}-tag"),
        });
        files.push(PlannedFile {
            action: PlannedAction::Create,
            path: layout.fixture_dir(&versions.new.minor_form_compact()),
            detail: format!(
                "copy of {}, {} = {new}",
                layout.display_relative(&layout.fixture_dir(&versions.current.minor_form_compact())),
                config.fixture.constant_name
            ),
        });
        files.push(PlannedFile {
            action: PlannedAction::Modify,
            path: layout.engine_dependency(),
            detail: format!("{} = {current}", config.engine_dependency.key),
        });

        Self {
            versions,
            dialects,
            files,
            root: layout.root().to_path_buf(),
        }
    }

    pub fn creates(&self) -> impl Iterator<Item = &PlannedFile> {
        self.files
            .iter()
            .filter(|f| f.action == PlannedAction::Create)
    }

    pub fn modifies(&self) -> impl Iterator<Item = &PlannedFile> {
        self.files
            .iter()
            .filter(|f| f.action == PlannedAction::Modify)
    }

    fn relative(&self, file: &PlannedFile) -> String {
        file.path
            .strip_prefix(&self.root)
            .unwrap_or(&file.path)
            .display()
            .to_string()
    }
}

impl fmt::Display for BumpPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Bump {} -> {} (previous {})",
            self.versions.current, self.versions.new, self.versions.previous
        )?;
        writeln!(f, "Dialects: {}", self.dialects)?;

        writeln!(f)?;
        writeln!(f, "Files to create:")?;
        for file in self.creates() {
            writeln!(f, "  + {}  ({})", self.relative(file), file.detail)?;
        }

        writeln!(f)?;
        writeln!(f, "Files to modify:")?;
        for file in self.modifies() {
            writeln!(f, "  ~ {}  ({})", self.relative(file), file.detail)?;
        }
        Ok(())
    }
}
