//! Bump command implementation

use anyhow::{Context, Result};
use sb_core::{DialectSet, Layout};
use sb_runner::{BumpOutcome, BumpReport, BumpRequest, BumpRunner, Prompter};
use std::io;

use crate::cli::{BumpArgs, GlobalArgs};
use crate::commands::common::{copyright_year, load_layout};
use crate::commands::prompt::LinePrompter;

/// Execute the bump command
pub(crate) async fn execute(args: &BumpArgs, global: &GlobalArgs) -> Result<()> {
    let layout = load_layout(global)?;

    let report = if args.yes {
        run_bump(&layout, args, None)?
    } else {
        let stdin = io::stdin();
        let mut prompter = LinePrompter::new(stdin.lock(), io::stdout());
        run_bump(&layout, args, Some(&mut prompter))?
    };

    print_report(&layout, &report, global.verbose);
    Ok(())
}

fn run_bump(
    layout: &Layout,
    args: &BumpArgs,
    prompter: Option<&mut dyn Prompter>,
) -> Result<BumpReport> {
    let dialects = args
        .dialects
        .as_deref()
        .map(DialectSet::parse_list)
        .transpose()
        .context("Invalid --dialects")?;

    let request = BumpRequest {
        new_version: args.new_version,
        dialects,
        dry_run: args.dry_run,
    };

    BumpRunner::new(layout, copyright_year())
        .run(&request, prompter)
        .context("Schema version bump failed")
}

fn print_report(layout: &Layout, report: &BumpReport, verbose: bool) {
    match report.outcome {
        BumpOutcome::Planned => {
            println!("Dry run - no files were changed");
            println!();
            println!("{}", report.plan);
            return;
        }
        BumpOutcome::Aborted => {
            println!("Bump aborted, no files were changed");
            return;
        }
        BumpOutcome::Completed => {}
    }

    let versions = &report.plan.versions;
    println!(
        "Bumped schema version {} -> {} ({})",
        versions.current, versions.new, report.plan.dialects
    );

    let created: Vec<_> = report.created_files().collect();
    if !created.is_empty() {
        println!();
        println!("Created:");
        for path in created {
            println!("  + {}", layout.display_relative(path));
        }
    }

    let modified: Vec<_> = report.modified_files().collect();
    if !modified.is_empty() {
        println!();
        println!("Modified:");
        for path in modified {
            println!("  ~ {}", layout.display_relative(path));
        }
    }

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            if verbose {
                println!("  ! [{:?}] {}", warning.kind(), warning);
            } else {
                println!("  ! {}", warning);
            }
        }
    }

    for reminder in &report.reminders {
        println!();
        println!("Note: {}", reminder);
    }
}

#[cfg(test)]
#[path = "bump_test.rs"]
mod tests;
