//! Schema-log id extraction from existing upgrade scripts

use crate::error::{ArtifactError, ArtifactResult};
use crate::sql::scan_schema_log_rows;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Gap between the schema-log ids of two consecutive minor versions. Patch
/// releases take ids from inside the gap without renumbering.
pub const SCHEMA_LOG_ID_STEP: u64 = 100;

/// A row asserting that the schema reached `version` via upgrade step `id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaLogEntry {
    pub id: u64,
    pub version: String,
    /// Timestamp expression used by the row, reused for the next script
    pub timestamp: String,
}

impl SchemaLogEntry {
    /// The entry the next minor version's upgrade script inserts; `None`
    /// when the id step would overflow
    pub fn next(&self, version: &str) -> Option<SchemaLogEntry> {
        Some(SchemaLogEntry {
            id: self.id.checked_add(SCHEMA_LOG_ID_STEP)?,
            version: version.to_string(),
            timestamp: self.timestamp.clone(),
        })
    }
}

/// Find the schema-log entry recorded for `version` in an upgrade script.
///
/// Returns `Ok(None)` if the script does not exist or has no row whose
/// version literal equals `version` exactly.
pub fn extract_entry(
    script: &Path,
    table: &str,
    version: &str,
) -> ArtifactResult<Option<SchemaLogEntry>> {
    let sql = match fs::read_to_string(script) {
        Ok(sql) => sql,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ArtifactError::io(script, e)),
    };

    Ok(scan_schema_log_rows(&sql, table)
        .into_iter()
        .find(|row| row.version == version)
        .map(|row| SchemaLogEntry {
            id: row.id,
            version: row.version,
            timestamp: row.timestamp,
        }))
}

/// Numeric id of the schema-log entry for `version`, if any
pub fn extract_id(script: &Path, table: &str, version: &str) -> ArtifactResult<Option<u64>> {
    Ok(extract_entry(script, table, version)?.map(|entry| entry.id))
}

/// Version recorded in the row-0 entry of a bootstrap script.
///
/// Returns `Ok(None)` if the script does not exist or has no row 0.
pub fn bootstrap_version(script: &Path, table: &str) -> ArtifactResult<Option<String>> {
    let sql = match fs::read_to_string(script) {
        Ok(sql) => sql,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ArtifactError::io(script, e)),
    };

    Ok(scan_schema_log_rows(&sql, table)
        .into_iter()
        .find(|row| row.id == 0)
        .map(|row| row.version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TABLE: &str = "ACT_GE_SCHEMA_LOG";

    #[test]
    fn test_extract_id_exact_version_match() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("h2_engine_1.1_to_1.2.sql");
        fs::write(
            &script,
            "insert into ACT_GE_SCHEMA_LOG\nvalues ('500', CURRENT_TIMESTAMP, '1.2.0');\n",
        )
        .unwrap();

        assert_eq!(extract_id(&script, TABLE, "1.2.0").unwrap(), Some(500));
        assert_eq!(extract_id(&script, TABLE, "1.2").unwrap(), None);
        assert_eq!(extract_id(&script, TABLE, "1.2.0.1").unwrap(), None);
    }

    #[test]
    fn test_extract_id_missing_script() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("absent.sql");
        assert_eq!(extract_id(&script, TABLE, "1.2.0").unwrap(), None);
    }

    #[test]
    fn test_next_entry_adds_step() {
        let entry = SchemaLogEntry {
            id: 500,
            version: "1.2.0".to_string(),
            timestamp: "CURRENT_TIMESTAMP".to_string(),
        };
        let next = entry.next("1.3.0").unwrap();
        assert_eq!(next.id, 600);
        assert_eq!(next.version, "1.3.0");
        assert_eq!(next.timestamp, "CURRENT_TIMESTAMP");
    }

    #[test]
    fn test_next_entry_overflow() {
        let entry = SchemaLogEntry {
            id: u64::MAX - 50,
            version: "1.2.0".to_string(),
            timestamp: "CURRENT_TIMESTAMP".to_string(),
        };
        assert_eq!(entry.next("1.3.0"), None);
    }

    #[test]
    fn test_bootstrap_version_reads_row_zero() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("activiti.h2.create.engine.sql");
        fs::write(
            &script,
            "insert into ACT_GE_SCHEMA_LOG\nvalues ('0', CURRENT_TIMESTAMP, '1.2.0');\n",
        )
        .unwrap();

        assert_eq!(
            bootstrap_version(&script, TABLE).unwrap().as_deref(),
            Some("1.2.0")
        );
        assert_eq!(
            bootstrap_version(&dir.path().join("absent.sql"), TABLE).unwrap(),
            None
        );
    }
}
