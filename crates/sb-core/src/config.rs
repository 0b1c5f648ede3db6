//! Configuration types and parsing for schemabump.yml
//!
//! Every field has a default matching the Operaton source tree, so a project
//! with that layout needs no configuration file at all.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the optional configuration file at the project root
pub const CONFIG_FILE_NAME: &str = "schemabump.yml";

/// Main configuration from schemabump.yml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Document holding the current and previous schema versions
    #[serde(default)]
    pub version_store: VersionStoreConfig,

    /// Bootstrap and upgrade SQL scripts
    #[serde(default)]
    pub sql: SqlConfig,

    /// Liquibase changelog
    #[serde(default)]
    pub changelog: ChangelogConfig,

    /// Migration test fixtures
    #[serde(default)]
    pub fixture: FixtureConfig,

    /// Property recording the engine version the migration tests start from
    #[serde(default = "default_engine_dependency")]
    pub engine_dependency: PropertyRef,
}

/// Location of the version-of-record properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionStoreConfig {
    /// Path of the XML document, relative to the project root
    #[serde(default = "default_version_store_path")]
    pub path: String,

    /// Property holding the current schema version
    #[serde(default = "default_current_key")]
    pub current_key: String,

    /// Property holding the previous schema version
    #[serde(default = "default_previous_key")]
    pub previous_key: String,
}

impl Default for VersionStoreConfig {
    fn default() -> Self {
        Self {
            path: default_version_store_path(),
            current_key: default_current_key(),
            previous_key: default_previous_key(),
        }
    }
}

/// SQL script locations and formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqlConfig {
    /// Bootstrap script path pattern; `{dialect}` is substituted
    #[serde(default = "default_bootstrap_pattern")]
    pub bootstrap: String,

    /// Upgrade script path pattern; `{dialect}`, `{from}` and `{to}` are substituted
    #[serde(default = "default_upgrade_pattern")]
    pub upgrade: String,

    /// Table the schema-log rows are inserted into
    #[serde(default = "default_schema_log_table")]
    pub schema_log_table: String,

    /// Copyright holder written into new upgrade scripts
    #[serde(default = "default_license_holder")]
    pub license_holder: String,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            bootstrap: default_bootstrap_pattern(),
            upgrade: default_upgrade_pattern(),
            schema_log_table: default_schema_log_table(),
            license_holder: default_license_holder(),
        }
    }
}

/// Liquibase changelog settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangelogConfig {
    /// Changelog path, relative to the project root
    #[serde(default = "default_changelog_path")]
    pub path: String,

    /// `sqlFile` path written into the change-set; `{from}` and `{to}` are
    /// substituted, Liquibase resolves `${db.name}` per dialect at runtime
    #[serde(default = "default_changelog_sql_file")]
    pub sql_file: String,

    /// Author attribute of generated change-sets
    #[serde(default = "default_changelog_author")]
    pub author: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            path: default_changelog_path(),
            sql_file: default_changelog_sql_file(),
            author: default_changelog_author(),
        }
    }
}

/// Migration test fixture settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureConfig {
    /// Directory containing the fixture baselines
    #[serde(default = "default_fixture_root")]
    pub root: String,

    /// Fixture directory name pattern; `{key}` is the compact minor version
    #[serde(default = "default_fixture_directory")]
    pub directory: String,

    /// Source file inside a fixture declaring the engine version constant
    #[serde(default = "default_fixture_constant_file")]
    pub constant_file: String,

    /// Name of the engine version constant
    #[serde(default = "default_fixture_constant_name")]
    pub constant_name: String,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            root: default_fixture_root(),
            directory: default_fixture_directory(),
            constant_file: default_fixture_constant_file(),
            constant_name: default_fixture_constant_name(),
        }
    }
}

/// A single property in an XML document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyRef {
    /// Document path, relative to the project root
    pub path: String,

    /// Property name
    pub key: String,
}

const DB_RESOURCES: &str = "engine/src/main/resources/org/operaton/bpm/engine/db";

fn default_version_store_path() -> String {
    "database/pom.xml".to_string()
}

fn default_current_key() -> String {
    "operaton.version.current".to_string()
}

fn default_previous_key() -> String {
    "operaton.version.previous".to_string()
}

fn default_bootstrap_pattern() -> String {
    format!("{DB_RESOURCES}/create/activiti.{{dialect}}.create.engine.sql")
}

fn default_upgrade_pattern() -> String {
    format!("{DB_RESOURCES}/upgrade/{{dialect}}_engine_{{from}}_to_{{to}}.sql")
}

fn default_schema_log_table() -> String {
    "ACT_GE_SCHEMA_LOG".to_string()
}

fn default_license_holder() -> String {
    "the Operaton contributors".to_string()
}

fn default_changelog_path() -> String {
    format!("{DB_RESOURCES}/liquibase/operaton-changelog.xml")
}

fn default_changelog_sql_file() -> String {
    "upgrade/${db.name}_engine_{from}_to_{to}.sql".to_string()
}

fn default_changelog_author() -> String {
    "Operaton".to_string()
}

fn default_fixture_root() -> String {
    "qa/test-db-instance-migration".to_string()
}

fn default_fixture_directory() -> String {
    "test-fixture-{key}".to_string()
}

fn default_fixture_constant_file() -> String {
    "src/main/java/org/operaton/bpm/qa/upgrade/TestFixture.java".to_string()
}

fn default_fixture_constant_name() -> String {
    "ENGINE_VERSION".to_string()
}

fn default_engine_dependency() -> PropertyRef {
    PropertyRef {
        path: "qa/test-db-instance-migration/pom.xml".to_string(),
        key: "operaton.version.old".to_string(),
    }
}

impl Default for PropertyRef {
    fn default() -> Self {
        default_engine_dependency()
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `schemabump.yml` from a project directory, falling back to the
    /// defaults when the file does not exist
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            log::debug!(
                "No {} in {}, using default layout",
                CONFIG_FILE_NAME,
                dir.display()
            );
            Ok(Self::default())
        }
    }

    /// Check that every path pattern carries the placeholders it needs
    pub fn validate(&self) -> CoreResult<()> {
        let required: [(&str, &str, &[&str]); 4] = [
            ("sql.bootstrap", self.sql.bootstrap.as_str(), &["{dialect}"]),
            (
                "sql.upgrade",
                self.sql.upgrade.as_str(),
                &["{dialect}", "{from}", "{to}"],
            ),
            ("changelog.sql_file", self.changelog.sql_file.as_str(), &["{from}", "{to}"]),
            ("fixture.directory", self.fixture.directory.as_str(), &["{key}"]),
        ];

        for (field, pattern, placeholders) in required {
            for placeholder in placeholders {
                if !pattern.contains(placeholder) {
                    return Err(CoreError::ConfigInvalid {
                        message: format!("{field} '{pattern}' must contain {placeholder}"),
                    });
                }
            }
        }

        if self.sql.schema_log_table.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "sql.schema_log_table must not be empty".to_string(),
            });
        }
        if self.fixture.constant_name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "fixture.constant_name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
