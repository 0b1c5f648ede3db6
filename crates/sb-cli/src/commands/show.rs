//! Show command implementation

use anyhow::{Context, Result};
use sb_artifacts::{bootstrap_version, extract_id};
use sb_core::{Dialect, Layout, Version};
use sb_runner::BumpRunner;
use serde::Serialize;

use crate::cli::{GlobalArgs, ShowArgs, ShowOutput};
use crate::commands::common::{copyright_year, load_layout};

/// Recorded versions and the per-dialect state derived from them
#[derive(Debug, Serialize)]
struct VersionStatus {
    current: Version,
    previous: Version,
    /// Default bump target; absent when the minor component is at its limit
    proposed: Option<Version>,
    dialects: Vec<DialectStatus>,
}

#[derive(Debug, Serialize)]
struct DialectStatus {
    dialect: Dialect,
    /// Version in the bootstrap script's row 0
    bootstrap_version: Option<String>,
    /// Upgrade script that reached the current version
    upgrade_script: String,
    /// Schema-log id recorded for the current version in that script
    schema_log_id: Option<u64>,
}

/// Execute the show command
pub(crate) async fn execute(args: &ShowArgs, global: &GlobalArgs) -> Result<()> {
    let layout = load_layout(global)?;
    let status = collect_status(&layout)?;

    match args.output {
        ShowOutput::Table => print_table(&status),
        ShowOutput::Json => print_json(&status)?,
    }
    Ok(())
}

fn collect_status(layout: &Layout) -> Result<VersionStatus> {
    let (current, previous) = BumpRunner::new(layout, copyright_year())
        .stored_versions()
        .context("Failed to read stored versions")?;
    let table = &layout.config().sql.schema_log_table;

    let mut dialects = Vec::with_capacity(Dialect::ALL.len());
    for dialect in Dialect::ALL {
        let upgrade =
            layout.upgrade_script(dialect, &previous.minor_form(), &current.minor_form());
        dialects.push(DialectStatus {
            dialect,
            bootstrap_version: bootstrap_version(&layout.bootstrap_script(dialect), table)?,
            schema_log_id: extract_id(&upgrade, table, &current.to_string())?,
            upgrade_script: layout.display_relative(&upgrade),
        });
    }

    Ok(VersionStatus {
        current,
        previous,
        proposed: current.propose_next().ok(),
        dialects,
    })
}

/// Print status in table format
fn print_table(status: &VersionStatus) {
    println!("Current version:  {}", status.current);
    println!("Previous version: {}", status.previous);
    match status.proposed {
        Some(proposed) => println!("Proposed next:    {}", proposed),
        None => println!("Proposed next:    - (pass --new-version)"),
    }
    println!();

    let dialect_width = status
        .dialects
        .iter()
        .map(|d| d.dialect.as_str().len())
        .max()
        .unwrap_or(7)
        .max(7);

    println!(
        "{:<dialect_width$}  {:<9}  {:<13}  UPGRADE SCRIPT",
        "DIALECT", "BOOTSTRAP", "SCHEMA LOG ID"
    );
    println!(
        "{:<dialect_width$}  {:<9}  {:<13}  {}",
        "-".repeat(dialect_width),
        "-".repeat(9),
        "-".repeat(13),
        "-".repeat(14)
    );

    for dialect in &status.dialects {
        let bootstrap = dialect.bootstrap_version.as_deref().unwrap_or("-");
        let id = dialect
            .schema_log_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<dialect_width$}  {:<9}  {:<13}  {}",
            dialect.dialect.as_str(),
            bootstrap,
            id,
            dialect.upgrade_script
        );
    }
}

/// Print status in JSON format
fn print_json(status: &VersionStatus) -> Result<()> {
    let json = serde_json::to_string_pretty(status).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}
