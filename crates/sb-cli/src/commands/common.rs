//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use sb_core::{Config, Layout};

use crate::cli::GlobalArgs;

/// Load the configuration and resolve the artifact layout of the project
pub(crate) fn load_layout(global: &GlobalArgs) -> Result<Layout> {
    let config = match &global.config {
        Some(path) => Config::load(path),
        None => Config::load_from_dir(&global.project_dir),
    }
    .context("Failed to load schemabump configuration")?;
    log::debug!("Project root: {}", global.project_dir.display());
    Ok(Layout::new(&global.project_dir, config))
}

/// Year written into the license header of generated scripts
pub(crate) fn copyright_year() -> i32 {
    Utc::now().year()
}
