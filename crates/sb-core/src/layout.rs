//! Resolution of artifact paths from a project root and its configuration

use crate::config::Config;
use crate::dialect::Dialect;
use std::path::{Path, PathBuf};

/// Resolves where each artifact of a bump lives in the project tree
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
    config: Config,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Document holding the current and previous versions
    pub fn version_store(&self) -> PathBuf {
        self.root.join(&self.config.version_store.path)
    }

    /// Bootstrap (create) script of one dialect
    pub fn bootstrap_script(&self, dialect: Dialect) -> PathBuf {
        self.root
            .join(self.config.sql.bootstrap.replace("{dialect}", dialect.as_str()))
    }

    /// Upgrade script of one dialect from `from` to `to` (both minor forms)
    pub fn upgrade_script(&self, dialect: Dialect, from: &str, to: &str) -> PathBuf {
        self.root.join(
            self.config
                .sql
                .upgrade
                .replace("{dialect}", dialect.as_str())
                .replace("{from}", from)
                .replace("{to}", to),
        )
    }

    pub fn changelog(&self) -> PathBuf {
        self.root.join(&self.config.changelog.path)
    }

    /// `sqlFile` path written into the changelog for a minor-version step
    pub fn changelog_sql_file(&self, from: &str, to: &str) -> String {
        self.config
            .changelog
            .sql_file
            .replace("{from}", from)
            .replace("{to}", to)
    }

    /// Fixture baseline directory for a compact minor key
    pub fn fixture_dir(&self, key: &str) -> PathBuf {
        self.root
            .join(&self.config.fixture.root)
            .join(self.config.fixture.directory.replace("{key}", key))
    }

    /// Path of the version constant file relative to a fixture directory
    pub fn fixture_constant_file(&self) -> &Path {
        Path::new(&self.config.fixture.constant_file)
    }

    /// Document holding the previous-engine-version property
    pub fn engine_dependency(&self) -> PathBuf {
        self.root.join(&self.config.engine_dependency.path)
    }

    /// Render a path relative to the project root for display
    pub fn display_relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
