//! Migration test fixture cloning

use crate::error::{ArtifactError, ArtifactResult};
use crate::outcome::{ArtifactWarning, StepOutcome};
use regex::Regex;
use sb_core::Layout;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static STRING_ASSIGNMENT_RE: OnceLock<Regex> = OnceLock::new();

/// Creates the fixture baseline for a new version from an existing one
#[derive(Debug, Clone, Copy)]
pub struct FixtureCloner<'a> {
    layout: &'a Layout,
}

impl<'a> FixtureCloner<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self { layout }
    }

    /// Copy the fixture keyed by `source_key` to `new_key` and point its
    /// version constant at `new_version`.
    ///
    /// Keys are compact minor forms (`1.2` -> `12`). The source is the
    /// baseline of the version being bumped from, so its constant holds
    /// `current_version`: bumping 1.2.x to 1.3.0 clones `12` to `13`.
    ///
    /// A missing source or an existing destination aborts the clone with a
    /// warning and leaves the filesystem untouched. A copy that fails part
    /// way removes the partial destination before returning the error.
    pub fn clone_fixture(
        &self,
        source_key: &str,
        new_key: &str,
        current_version: &str,
        new_version: &str,
    ) -> ArtifactResult<StepOutcome> {
        let mut outcome = StepOutcome::default();
        let source = self.layout.fixture_dir(source_key);
        let target = self.layout.fixture_dir(new_key);

        if !source.is_dir() {
            outcome.warn(ArtifactWarning::FixtureSourceMissing { path: source });
            return Ok(outcome);
        }
        if target.exists() {
            outcome.warn(ArtifactWarning::FixtureTargetExists { path: target });
            return Ok(outcome);
        }

        if let Err(e) = copy_dir_recursive(&source, &target) {
            remove_partial_copy(&target);
            return Err(e);
        }
        outcome.created(target.clone());

        match self.find_constant_file(&target) {
            Some(file) => {
                self.rewrite_constant(&file, current_version, new_version, &mut outcome)?
            }
            None => outcome.warn(ArtifactWarning::FixtureConstantFileMissing {
                path: target.join(self.layout.fixture_constant_file()),
            }),
        }

        outcome.remind(format!(
            "New files under {} are not tracked by git yet; add them with `git add {}`",
            self.layout.display_relative(&target),
            self.layout.display_relative(&target),
        ));
        Ok(outcome)
    }

    /// The configured constant file, or the first file with the same name
    /// anywhere in the fixture if the package layout moved
    fn find_constant_file(&self, fixture: &Path) -> Option<PathBuf> {
        let relative = self.layout.fixture_constant_file();
        let direct = fixture.join(relative);
        if direct.is_file() {
            return Some(direct);
        }

        let file_name = relative.file_name()?.to_str()?;
        let pattern = format!(
            "{}/**/{}",
            glob::Pattern::escape(fixture.to_str()?),
            glob::Pattern::escape(file_name)
        );
        let mut matches = match glob::glob(&pattern) {
            Ok(paths) => paths.filter_map(Result::ok).filter(|p| p.is_file()),
            Err(e) => {
                log::debug!("Invalid fixture search pattern {pattern}: {e}");
                return None;
            }
        };
        let found = matches.next();
        if let Some(path) = &found {
            log::debug!("Version constant file found at {}", path.display());
        }
        found
    }

    fn rewrite_constant(
        &self,
        file: &Path,
        current_version: &str,
        new_version: &str,
        outcome: &mut StepOutcome,
    ) -> ArtifactResult<()> {
        let constant = &self.layout.config().fixture.constant_name;
        let source = fs::read_to_string(file).map_err(|e| ArtifactError::io(file, e))?;

        match rewrite_version_constant(&source, constant, current_version, new_version) {
            Ok(rewritten) => {
                fs::write(file, rewritten).map_err(|e| ArtifactError::io(file, e))?;
                outcome.modified(file.to_path_buf());
            }
            Err(found) => outcome.warn(ArtifactWarning::FixtureConstantNotFound {
                path: file.to_path_buf(),
                constant: constant.clone(),
                expected: current_version.to_string(),
                found,
            }),
        }
        Ok(())
    }
}

/// Replace the string literal assigned to `constant` when it equals `from`.
///
/// On failure returns the literal actually found, or `None` if there is no
/// declaration.
pub fn rewrite_version_constant(
    source: &str,
    constant: &str,
    from: &str,
    to: &str,
) -> Result<String, Option<String>> {
    let literal = string_assignment_re()
        .captures_iter(source)
        .find(|caps| &caps[1] == constant)
        .and_then(|caps| caps.get(2))
        .ok_or(None)?;
    if literal.as_str() != from {
        return Err(Some(literal.as_str().to_string()));
    }

    let mut rewritten = source.to_string();
    rewritten.replace_range(literal.range(), to);
    Ok(rewritten)
}

fn string_assignment_re() -> &'static Regex {
    STRING_ASSIGNMENT_RE.get_or_init(|| {
        Regex::new(r#"\b([A-Za-z_][A-Za-z0-9_]*)\s*=\s*"([^"]*)""#).expect("valid regex")
    })
}

fn remove_partial_copy(target: &Path) {
    match fs::remove_dir_all(target) {
        Ok(()) => log::debug!("Removed partial fixture copy {}", target.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => log::warn!(
            "Failed to remove partial fixture copy {}: {e}",
            target.display()
        ),
    }
}

fn copy_dir_recursive(source: &Path, target: &Path) -> ArtifactResult<()> {
    fs::create_dir_all(target).map_err(|e| ArtifactError::io(target, e))?;
    let entries = fs::read_dir(source).map_err(|e| ArtifactError::io(source, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| ArtifactError::io(source, e))?;
        let from = entry.path();
        let to = target.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| ArtifactError::io(&from, e))?;
        if file_type.is_dir() {
            copy_dir_recursive(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| ArtifactError::io(&from, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "fixture_test.rs"]
mod tests;
