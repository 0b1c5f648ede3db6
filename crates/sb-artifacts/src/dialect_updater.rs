//! Per-dialect bootstrap rewrite and upgrade script generation

use crate::error::{ArtifactError, ArtifactResult};
use crate::outcome::{ArtifactWarning, StepOutcome};
use crate::schema_log::{extract_entry, SchemaLogEntry};
use crate::sql::rewrite_bootstrap_version;
use sb_core::{Dialect, Layout, VersionTriple};
use std::fs;
use std::path::Path;

/// Applies one bump to the SQL scripts of a single dialect
#[derive(Debug, Clone, Copy)]
pub struct DialectUpdater<'a> {
    layout: &'a Layout,
    copyright_year: i32,
}

impl<'a> DialectUpdater<'a> {
    /// `copyright_year` goes into the license header of new upgrade scripts
    pub fn new(layout: &'a Layout, copyright_year: i32) -> Self {
        Self {
            layout,
            copyright_year,
        }
    }

    /// Rewrite the bootstrap script and create the upgrade script for `dialect`.
    ///
    /// Missing inputs are reported as warnings; only I/O failures are errors.
    pub fn update(&self, dialect: Dialect, versions: &VersionTriple) -> ArtifactResult<StepOutcome> {
        let mut outcome = StepOutcome::default();
        self.update_bootstrap(dialect, versions, &mut outcome)?;
        self.create_upgrade(dialect, versions, &mut outcome)?;
        Ok(outcome)
    }

    fn table(&self) -> &str {
        &self.layout.config().sql.schema_log_table
    }

    fn update_bootstrap(
        &self,
        dialect: Dialect,
        versions: &VersionTriple,
        outcome: &mut StepOutcome,
    ) -> ArtifactResult<()> {
        let path = self.layout.bootstrap_script(dialect);
        if !path.exists() {
            outcome.warn(ArtifactWarning::BootstrapMissing { dialect, path });
            return Ok(());
        }

        let sql = fs::read_to_string(&path).map_err(|e| ArtifactError::io(&path, e))?;
        let Some(rewritten) = rewrite_bootstrap_version(&sql, self.table(), &versions.new.to_string())
        else {
            outcome.warn(ArtifactWarning::BootstrapRowMissing { dialect, path });
            return Ok(());
        };

        if rewritten == sql {
            log::debug!("[{dialect}] bootstrap already at {}", versions.new);
            return Ok(());
        }
        fs::write(&path, rewritten).map_err(|e| ArtifactError::io(&path, e))?;
        outcome.modified(path);
        Ok(())
    }

    fn create_upgrade(
        &self,
        dialect: Dialect,
        versions: &VersionTriple,
        outcome: &mut StepOutcome,
    ) -> ArtifactResult<()> {
        let source = self.layout.upgrade_script(
            dialect,
            &versions.previous.minor_form(),
            &versions.current.minor_form(),
        );
        if !source.exists() {
            outcome.warn(ArtifactWarning::UpgradeSourceMissing {
                dialect,
                path: source,
            });
            return Ok(());
        }

        let current = versions.current.to_string();
        let Some(entry) = extract_entry(&source, self.table(), &current)? else {
            outcome.warn(ArtifactWarning::SchemaLogEntryMissing {
                dialect,
                path: source,
                version: current,
            });
            return Ok(());
        };

        let target = self.layout.upgrade_script(
            dialect,
            &versions.current.minor_form(),
            &versions.new.minor_form(),
        );
        if target.exists() {
            outcome.warn(ArtifactWarning::UpgradeTargetExists {
                dialect,
                path: target,
            });
            return Ok(());
        }

        let Some(next) = entry.next(&versions.new.to_string()) else {
            outcome.warn(ArtifactWarning::SchemaLogIdOverflow {
                dialect,
                path: source,
                id: entry.id,
            });
            return Ok(());
        };
        log::debug!(
            "[{dialect}] schema log id {} -> {} for {}",
            entry.id,
            next.id,
            next.version
        );
        let script = render_upgrade_script(
            self.copyright_year,
            &self.layout.config().sql.license_holder,
            self.table(),
            &next,
        );
        write_new_file(&target, &script)?;
        outcome.created(target);
        Ok(())
    }
}

fn write_new_file(path: &Path, content: &str) -> ArtifactResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ArtifactError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| ArtifactError::io(path, e))
}

/// Render a new upgrade script: license header plus one schema-log insert
pub fn render_upgrade_script(
    year: i32,
    holder: &str,
    table: &str,
    entry: &SchemaLogEntry,
) -> String {
    format!(
        "\
--
-- Copyright {year} {holder}.
--
-- Licensed under the Apache License, Version 2.0 (the \"License\");
-- you may not use this file except in compliance with the License.
-- You may obtain a copy of the License at
--
--     https://www.apache.org/licenses/LICENSE-2.0
--
-- Unless required by applicable law or agreed to in writing, software
-- distributed under the License is distributed on an \"AS IS\" BASIS,
-- WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
-- See the License for the specific language governing permissions and
-- limitations under the License.
--

insert into {table}
values ('{id}', {timestamp}, '{version}');
",
        id = entry.id,
        timestamp = entry.timestamp,
        version = entry.version,
    )
}

#[cfg(test)]
#[path = "dialect_updater_test.rs"]
mod tests;
