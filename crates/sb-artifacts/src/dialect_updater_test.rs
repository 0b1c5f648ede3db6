use super::*;
use crate::outcome::{FileChange, WarningKind};
use crate::schema_log::extract_id;
use sb_core::{Config, Version};
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

const BOOTSTRAP: &str = "\
create table ACT_GE_SCHEMA_LOG (
    ID_ varchar(64),
    TIMESTAMP_ timestamp,
    VERSION_ varchar(255),
    primary key (ID_)
);

insert into ACT_GE_SCHEMA_LOG
values ('0', CURRENT_TIMESTAMP, '1.2.0');
";

const PRIOR_UPGRADE: &str = "\
--
-- Copyright 2025 the Operaton contributors.
--

insert into ACT_GE_SCHEMA_LOG
values ('500', CURRENT_TIMESTAMP, '1.2.0');
";

fn versions() -> VersionTriple {
    VersionTriple::new(
        Version::new(1, 2, 0),
        Version::new(1, 1, 0),
        Version::new(1, 3, 0),
    )
    .unwrap()
}

fn write(path: &PathBuf, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> (TempDir, Layout) {
    let dir = tempdir().unwrap();
    let layout = Layout::new(dir.path(), Config::default());
    (dir, layout)
}

#[test]
fn test_update_rewrites_bootstrap_and_creates_upgrade() {
    let (_dir, layout) = project();
    let bootstrap = layout.bootstrap_script(Dialect::H2);
    let prior = layout.upgrade_script(Dialect::H2, "1.1", "1.2");
    write(&bootstrap, BOOTSTRAP);
    write(&prior, PRIOR_UPGRADE);

    let outcome = DialectUpdater::new(&layout, 2026)
        .update(Dialect::H2, &versions())
        .unwrap();

    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
    let target = layout.upgrade_script(Dialect::H2, "1.2", "1.3");
    assert_eq!(
        outcome.changes,
        vec![
            FileChange::Modified(bootstrap.clone()),
            FileChange::Created(target.clone())
        ]
    );

    let rewritten = fs::read_to_string(&bootstrap).unwrap();
    assert_eq!(rewritten, BOOTSTRAP.replace("'1.2.0'", "'1.3.0'"));

    assert_eq!(
        extract_id(&target, "ACT_GE_SCHEMA_LOG", "1.3.0").unwrap(),
        Some(600)
    );
    let script = fs::read_to_string(&target).unwrap();
    assert!(script.starts_with("--\n-- Copyright 2026 the Operaton contributors.\n"));
    assert!(script.ends_with("insert into ACT_GE_SCHEMA_LOG\nvalues ('600', CURRENT_TIMESTAMP, '1.3.0');\n"));

    // the prior script is never touched
    assert_eq!(fs::read_to_string(&prior).unwrap(), PRIOR_UPGRADE);
}

#[test]
fn test_bootstrap_update_is_idempotent() {
    let (_dir, layout) = project();
    let bootstrap = layout.bootstrap_script(Dialect::Postgres);
    write(&bootstrap, BOOTSTRAP);

    let updater = DialectUpdater::new(&layout, 2026);
    updater.update(Dialect::Postgres, &versions()).unwrap();
    let once = fs::read(&bootstrap).unwrap();

    let second = updater.update(Dialect::Postgres, &versions()).unwrap();
    assert_eq!(fs::read(&bootstrap).unwrap(), once);
    assert!(second
        .changes
        .iter()
        .all(|c| c.path() != bootstrap.as_path()));
}

#[test]
fn test_missing_bootstrap_is_a_warning() {
    let (_dir, layout) = project();
    write(
        &layout.upgrade_script(Dialect::Db2, "1.1", "1.2"),
        PRIOR_UPGRADE,
    );

    let outcome = DialectUpdater::new(&layout, 2026)
        .update(Dialect::Db2, &versions())
        .unwrap();

    assert!(matches!(
        outcome.warnings.as_slice(),
        [ArtifactWarning::BootstrapMissing {
            dialect: Dialect::Db2,
            ..
        }]
    ));
    // the upgrade script is still produced
    assert!(layout.upgrade_script(Dialect::Db2, "1.2", "1.3").exists());
}

#[test]
fn test_bootstrap_without_row_zero_is_left_alone() {
    let (_dir, layout) = project();
    let bootstrap = layout.bootstrap_script(Dialect::MySql);
    let content = "create table ACT_GE_SCHEMA_LOG (ID_ varchar(64));\n";
    write(&bootstrap, content);

    let outcome = DialectUpdater::new(&layout, 2026)
        .update(Dialect::MySql, &versions())
        .unwrap();

    assert_eq!(fs::read_to_string(&bootstrap).unwrap(), content);
    assert!(outcome
        .warnings
        .iter()
        .any(|w| matches!(w, ArtifactWarning::BootstrapRowMissing { .. })));
}

#[test]
fn test_missing_prior_upgrade_skips_creation() {
    let (_dir, layout) = project();
    write(&layout.bootstrap_script(Dialect::Oracle), BOOTSTRAP);

    let outcome = DialectUpdater::new(&layout, 2026)
        .update(Dialect::Oracle, &versions())
        .unwrap();

    assert!(!layout.upgrade_script(Dialect::Oracle, "1.2", "1.3").exists());
    assert!(outcome
        .warnings
        .iter()
        .any(|w| matches!(w, ArtifactWarning::UpgradeSourceMissing { .. })));
}

#[test]
fn test_prior_upgrade_without_matching_entry_skips_creation() {
    let (_dir, layout) = project();
    write(
        &layout.upgrade_script(Dialect::MsSql, "1.1", "1.2"),
        &PRIOR_UPGRADE.replace("'1.2.0'", "'1.1.5'"),
    );

    let outcome = DialectUpdater::new(&layout, 2026)
        .update(Dialect::MsSql, &versions())
        .unwrap();

    assert!(!layout.upgrade_script(Dialect::MsSql, "1.2", "1.3").exists());
    match outcome.warnings.last() {
        Some(ArtifactWarning::SchemaLogEntryMissing { version, .. }) => {
            assert_eq!(version, "1.2.0");
        }
        other => panic!("unexpected warnings: {other:?}"),
    }
}

#[test]
fn test_existing_target_is_not_overwritten() {
    let (_dir, layout) = project();
    write(
        &layout.upgrade_script(Dialect::MariaDb, "1.1", "1.2"),
        PRIOR_UPGRADE,
    );
    let target = layout.upgrade_script(Dialect::MariaDb, "1.2", "1.3");
    write(&target, "-- hand written\n");

    let outcome = DialectUpdater::new(&layout, 2026)
        .update(Dialect::MariaDb, &versions())
        .unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "-- hand written\n");
    assert!(outcome
        .warnings
        .iter()
        .any(|w| matches!(w, ArtifactWarning::UpgradeTargetExists { .. })));
}

#[test]
fn test_new_script_reuses_timestamp_expression() {
    let (_dir, layout) = project();
    write(
        &layout.upgrade_script(Dialect::Oracle, "1.1", "1.2"),
        "insert into ACT_GE_SCHEMA_LOG\nvalues ('500', CURRENT_TIMESTAMP(6), '1.2.0');\n",
    );

    DialectUpdater::new(&layout, 2026)
        .update(Dialect::Oracle, &versions())
        .unwrap();

    let script =
        fs::read_to_string(layout.upgrade_script(Dialect::Oracle, "1.2", "1.3")).unwrap();
    assert!(script.contains("values ('600', CURRENT_TIMESTAMP(6), '1.3.0');"));
}

#[test]
fn test_schema_log_id_at_limit_skips_creation() {
    let (_dir, layout) = project();
    let source = layout.upgrade_script(Dialect::Db2, "1.1", "1.2");
    write(
        &source,
        &PRIOR_UPGRADE.replace("'500'", "'18446744073709551600'"),
    );

    let outcome = DialectUpdater::new(&layout, 2026)
        .update(Dialect::Db2, &versions())
        .unwrap();

    assert!(!layout.upgrade_script(Dialect::Db2, "1.2", "1.3").exists());
    let warning = outcome.warnings.last().unwrap();
    assert_eq!(warning.kind(), WarningKind::EmbeddedMarkerNotFound);
    match warning {
        ArtifactWarning::SchemaLogIdOverflow { path, id, .. } => {
            assert_eq!(path, &source);
            assert_eq!(*id, 18_446_744_073_709_551_600);
        }
        other => panic!("unexpected warning: {other:?}"),
    }
}
