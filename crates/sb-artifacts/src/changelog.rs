//! Liquibase changelog synchronization
//!
//! New change-sets are inserted immediately before the closing tag of the
//! changelog's root element. The closing tag is located with the XML reader,
//! so a `</databaseChangeLog>` inside a comment or CDATA section is never
//! mistaken for it.

use crate::error::{ArtifactError, ArtifactResult};
use crate::outcome::StepOutcome;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use sb_core::Layout;
use std::fs;

/// The two change-sets a minor-version bump adds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSetEntry {
    pub author: String,
    /// Minor form of the version being upgraded from
    pub from: String,
    /// Minor form of the version being upgraded to
    pub to: String,
    /// `sqlFile` path; carries the per-dialect placeholder
    pub sql_file: String,
    /// Full new version, used as the database tag
    pub tag: String,
}

impl ChangeSetEntry {
    pub fn sql_change_set_id(&self) -> String {
        format!("{}-to-{}", self.from, self.to)
    }

    pub fn tag_change_set_id(&self) -> String {
        format!("{}-tag", self.tag)
    }

    /// Render both change-sets, each line terminated by `newline`
    pub fn render(&self, newline: &str) -> String {
        let author = escape(self.author.as_str());
        let lines = [
            format!(
                "  <changeSet author=\"{author}\" id=\"{}\">",
                escape(self.sql_change_set_id().as_str())
            ),
            format!(
                "    <sqlFile path=\"{}\"",
                escape(self.sql_file.as_str())
            ),
            "             encoding=\"UTF-8\"".to_string(),
            "             relativeToChangelogFile=\"true\"".to_string(),
            "             splitStatements=\"true\"".to_string(),
            "             stripComments=\"true\"/>".to_string(),
            "  </changeSet>".to_string(),
            String::new(),
            format!(
                "  <changeSet author=\"{author}\" id=\"{}\">",
                escape(self.tag_change_set_id().as_str())
            ),
            format!("    <tagDatabase tag=\"{}\"/>", escape(self.tag.as_str())),
            "  </changeSet>".to_string(),
            String::new(),
        ];
        lines
            .iter()
            .map(|line| format!("{line}{newline}"))
            .collect()
    }
}

/// Byte offset of the `<` starting the root element's closing tag
fn find_closing_marker(xml: &str) -> Result<usize, String> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let before = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                depth += 1;
                seen_root = true;
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
                if seen_root && depth == 0 {
                    return Ok(before);
                }
            }
            Ok(Event::Eof) => {
                return Err(if seen_root {
                    "root element is never closed".to_string()
                } else {
                    "document has no root element".to_string()
                });
            }
            Ok(_) => {}
            Err(e) => return Err(e.to_string()),
        }
    }
}

/// Insert `entry` before the closing root tag of `xml`.
///
/// When the closing tag starts its own line the block goes at the start of
/// that line; otherwise directly before the tag on a fresh line. All other
/// bytes are kept.
pub fn insert_change_sets(xml: &str, entry: &ChangeSetEntry) -> Result<String, String> {
    let marker = find_closing_marker(xml)?;
    let newline = if xml.contains("\r\n") { "\r\n" } else { "\n" };

    let line_start = xml[..marker].rfind('\n').map_or(0, |i| i + 1);
    let (insert_at, block) = if xml[line_start..marker].trim().is_empty() {
        (line_start, entry.render(newline))
    } else {
        (marker, format!("{newline}{}", entry.render(newline)))
    };

    let mut updated = String::with_capacity(xml.len() + block.len());
    updated.push_str(&xml[..insert_at]);
    updated.push_str(&block);
    updated.push_str(&xml[insert_at..]);
    Ok(updated)
}

/// Appends the change-sets of a bump to the project's changelog
#[derive(Debug, Clone, Copy)]
pub struct ChangelogSynchronizer<'a> {
    layout: &'a Layout,
}

impl<'a> ChangelogSynchronizer<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self { layout }
    }

    /// Build the entry for a step from `from_minor` to `to_minor`
    pub fn entry(&self, from_minor: &str, to_minor: &str, new_version: &str) -> ChangeSetEntry {
        ChangeSetEntry {
            author: self.layout.config().changelog.author.clone(),
            from: from_minor.to_string(),
            to: to_minor.to_string(),
            sql_file: self.layout.changelog_sql_file(from_minor, to_minor),
            tag: new_version.to_string(),
        }
    }

    /// Insert the change-sets into the changelog file.
    ///
    /// Running twice inserts twice; existing entries are not inspected.
    pub fn insert(
        &self,
        from_minor: &str,
        to_minor: &str,
        new_version: &str,
    ) -> ArtifactResult<StepOutcome> {
        let path = self.layout.changelog();
        if !path.exists() {
            return Err(ArtifactError::DocumentNotFound {
                path: path.display().to_string(),
            });
        }

        let xml = fs::read_to_string(&path).map_err(|e| ArtifactError::io(&path, e))?;
        let entry = self.entry(from_minor, to_minor, new_version);
        if xml.contains(&format!("id=\"{}\"", entry.sql_change_set_id())) {
            log::warn!(
                "Changelog already contains change-set '{}', inserting again",
                entry.sql_change_set_id()
            );
        }

        let updated =
            insert_change_sets(&xml, &entry).map_err(|detail| ArtifactError::MarkerNotFound {
                path: path.display().to_string(),
                detail,
            })?;
        fs::write(&path, updated).map_err(|e| ArtifactError::io(&path, e))?;

        let mut outcome = StepOutcome::default();
        outcome.modified(path);
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "changelog_test.rs"]
mod tests;
