//! Line-oriented scanner for schema-log insert statements
//!
//! Recognizes statements of the form
//!
//! ```sql
//! insert into ACT_GE_SCHEMA_LOG
//! values ('600', CURRENT_TIMESTAMP, '1.3.0');
//! ```
//!
//! where the `values` tuple may sit on the same line as the `insert` or on a
//! following line before the terminating `;`, and several statements may
//! share a line. Byte ranges are reported against the whole script so
//! callers can splice replacements in place.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

static INSERT_RE: OnceLock<Regex> = OnceLock::new();
static VALUES_RE: OnceLock<Regex> = OnceLock::new();

fn insert_re() -> &'static Regex {
    INSERT_RE.get_or_init(|| {
        Regex::new(r#"(?i)\binsert\s+into\s+([A-Za-z0-9_."`\[\]]+)"#).expect("valid regex")
    })
}

fn values_re() -> &'static Regex {
    VALUES_RE.get_or_init(|| {
        Regex::new(r"(?i)\bvalues\s*\(\s*'(\d+)'\s*,\s*([^,]+?)\s*,\s*'([^']*)'\s*\)")
            .expect("valid regex")
    })
}

/// One schema-log row found in a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaLogRow {
    /// Numeric upgrade step id
    pub id: u64,
    /// Timestamp expression, e.g. `CURRENT_TIMESTAMP`
    pub timestamp: String,
    /// Version literal without quotes
    pub version: String,
    /// Byte range of the version literal's content in the script
    pub version_range: Range<usize>,
    /// 1-based line number of the `values` tuple
    pub line: usize,
}

/// Scan a script for rows inserted into `table` (case-insensitive; schema
/// qualifiers and identifier quotes are ignored)
pub fn scan_schema_log_rows(sql: &str, table: &str) -> Vec<SchemaLogRow> {
    let mut rows = Vec::new();
    let mut in_schema_log_insert = false;
    let mut offset = 0;

    for (index, line) in sql.split_inclusive('\n').enumerate() {
        let line_start = offset;
        offset += line.len();

        if line.trim_start().starts_with("--") {
            continue;
        }

        let mut segment_start = line_start;
        for segment in line.split_inclusive(';') {
            let base = segment_start;
            segment_start += segment.len();

            let mut search_from = 0;
            if let Some(caps) = insert_re().captures(segment) {
                in_schema_log_insert = table_matches(&caps[1], table);
                search_from = caps.get(0).map_or(0, |m| m.end());
            }

            if in_schema_log_insert {
                let values = &segment[search_from..];
                if let Some(row) = values_row(values, base + search_from, index + 1) {
                    rows.push(row);
                }
            }

            if segment.ends_with(';') {
                in_schema_log_insert = false;
            }
        }
    }

    rows
}

/// Parse the first `values` tuple in `text`, which starts at byte `base`
fn values_row(text: &str, base: usize, line: usize) -> Option<SchemaLogRow> {
    let caps = values_re().captures(text)?;
    let id = caps.get(1)?;
    let version = caps.get(3)?;
    Some(SchemaLogRow {
        id: id.as_str().parse().ok()?,
        timestamp: caps[2].to_string(),
        version: version.as_str().to_string(),
        version_range: base + version.start()..base + version.end(),
        line,
    })
}

fn table_matches(found: &str, table: &str) -> bool {
    let unqualified = found.rsplit('.').next().unwrap_or(found);
    let bare = unqualified.trim_matches(|c| matches!(c, '"' | '`' | '[' | ']'));
    bare.eq_ignore_ascii_case(table)
}

/// Rewrite the version literal of the id-0 row.
///
/// Returns `None` when the script has no id-0 row. Applying the same version
/// twice yields identical text.
pub fn rewrite_bootstrap_version(sql: &str, table: &str, version: &str) -> Option<String> {
    let row = scan_schema_log_rows(sql, table)
        .into_iter()
        .find(|row| row.id == 0)?;
    let mut rewritten = sql.to_string();
    rewritten.replace_range(row.version_range, version);
    Some(rewritten)
}

#[cfg(test)]
#[path = "sql_test.rs"]
mod tests;
