//! Bump state machine

use crate::error::{RunnerError, RunnerResult};
use crate::plan::BumpPlan;
use crate::prompt::Prompter;
use crate::report::{BumpOutcome, BumpReport};
use crate::stage::BumpStage;
use sb_artifacts::{
    set_property, ArtifactError, ChangelogSynchronizer, DialectUpdater, FixtureCloner,
    PropertyDocument,
};
use sb_core::{DialectSet, Layout, Version, VersionTriple};

/// Explicit inputs of a bump; anything left `None` is prompted for or
/// defaulted
#[derive(Debug, Clone, Default)]
pub struct BumpRequest {
    pub new_version: Option<Version>,
    pub dialects: Option<DialectSet>,
    /// Stop after planning, without writing anything
    pub dry_run: bool,
}

/// Runs a bump against one project tree
#[derive(Debug, Clone, Copy)]
pub struct BumpRunner<'a> {
    layout: &'a Layout,
    copyright_year: i32,
}

impl<'a> BumpRunner<'a> {
    /// `copyright_year` goes into the license header of new upgrade scripts
    pub fn new(layout: &'a Layout, copyright_year: i32) -> Self {
        Self {
            layout,
            copyright_year,
        }
    }

    /// Read the current and previous versions from the version store
    pub fn stored_versions(&self) -> RunnerResult<(Version, Version)> {
        let stage = BumpStage::ResolveVersions;
        let doc = PropertyDocument::open(&self.layout.version_store())
            .map_err(|source| RunnerError::Artifact { stage, source })?;
        let keys = &self.layout.config().version_store;
        let current = read_version(&doc, &keys.current_key)?;
        let previous = read_version(&doc, &keys.previous_key)?;
        Ok((current, previous))
    }

    /// Drive the bump through every stage.
    ///
    /// Without a prompter the run is non-interactive: missing inputs take
    /// their defaults and the plan is not confirmed. Recoverable conditions
    /// end up as warnings in the report; fatal ones stop the run and carry
    /// the stage they occurred in. Files written before a fatal error stay
    /// written.
    pub fn run(
        &self,
        request: &BumpRequest,
        mut prompter: Option<&mut dyn Prompter>,
    ) -> RunnerResult<BumpReport> {
        log::debug!("Entering stage: {}", BumpStage::ResolveVersions);
        let versions = self.resolve_versions(request, prompter.as_deref_mut())?;
        log::info!(
            "Bumping {} -> {} (previous {})",
            versions.current,
            versions.new,
            versions.previous
        );

        log::debug!("Entering stage: {}", BumpStage::SelectDialects);
        let dialects = match (&request.dialects, prompter.as_deref_mut()) {
            (Some(dialects), _) => dialects.clone(),
            (None, Some(p)) => p.dialects(&DialectSet::all()).map_err(|source| {
                RunnerError::Prompt {
                    stage: BumpStage::SelectDialects,
                    source,
                }
            })?,
            (None, None) => DialectSet::all(),
        };

        let plan = BumpPlan::new(self.layout, versions, dialects);
        let mut report = BumpReport::new(plan, BumpStage::SelectDialects);

        if request.dry_run {
            report.finish(BumpOutcome::Planned);
            return Ok(report);
        }

        if let Some(p) = prompter.as_deref_mut() {
            report.enter(BumpStage::ConfirmPlan);
            let confirmed = p.confirm(&report.plan).map_err(|source| RunnerError::Prompt {
                stage: BumpStage::ConfirmPlan,
                source,
            })?;
            if !confirmed {
                log::info!("Bump declined, nothing changed");
                report.finish(BumpOutcome::Aborted);
                return Ok(report);
            }
        }

        report.enter(BumpStage::ApplyPerDialect);
        let updater = DialectUpdater::new(self.layout, self.copyright_year);
        let dialects = report.plan.dialects.clone();
        for dialect in dialects.iter() {
            let outcome = updater
                .update(dialect, &versions)
                .map_err(artifact(BumpStage::ApplyPerDialect))?;
            report.absorb(outcome);
        }

        report.enter(BumpStage::UpdatePrimaryProperties);
        self.update_version_store(&versions, &mut report)?;

        report.enter(BumpStage::SyncChangelog);
        let outcome = ChangelogSynchronizer::new(self.layout)
            .insert(
                &versions.current.minor_form(),
                &versions.new.minor_form(),
                &versions.new.to_string(),
            )
            .map_err(artifact(BumpStage::SyncChangelog))?;
        report.absorb(outcome);

        report.enter(BumpStage::CloneFixture);
        let outcome = FixtureCloner::new(self.layout)
            .clone_fixture(
                &versions.current.minor_form_compact(),
                &versions.new.minor_form_compact(),
                &versions.current.to_string(),
                &versions.new.to_string(),
            )
            .map_err(artifact(BumpStage::CloneFixture))?;
        report.absorb(outcome);

        report.enter(BumpStage::UpdateSecondaryProperty);
        let path = self.layout.engine_dependency();
        set_property(
            &path,
            &self.layout.config().engine_dependency.key,
            &versions.current.to_string(),
        )
        .map_err(artifact(BumpStage::UpdateSecondaryProperty))?;
        report.modified(path);

        report.finish(BumpOutcome::Completed);
        Ok(report)
    }

    fn resolve_versions<'p>(
        &self,
        request: &BumpRequest,
        prompter: Option<&mut (dyn Prompter + 'p)>,
    ) -> RunnerResult<VersionTriple> {
        let stage = BumpStage::ResolveVersions;
        let (current, previous) = self.stored_versions()?;

        let new = match request.new_version {
            Some(version) => version,
            None => {
                let proposed = current
                    .propose_next()
                    .map_err(|source| RunnerError::Core { stage, source })?;
                match prompter {
                    Some(p) => p
                        .new_version(current, proposed)
                        .map_err(|source| RunnerError::Prompt { stage, source })?,
                    None => proposed,
                }
            }
        };

        VersionTriple::new(current, previous, new)
            .map_err(|source| RunnerError::Core { stage, source })
    }

    /// Write the new current and previous versions in one save
    fn update_version_store(
        &self,
        versions: &VersionTriple,
        report: &mut BumpReport,
    ) -> RunnerResult<()> {
        let on_error = artifact(BumpStage::UpdatePrimaryProperties);
        let keys = &self.layout.config().version_store;
        let mut doc = PropertyDocument::open(&self.layout.version_store()).map_err(on_error)?;
        doc.set(&keys.current_key, &versions.new.to_string())
            .map_err(on_error)?;
        doc.set(&keys.previous_key, &versions.current.to_string())
            .map_err(on_error)?;
        doc.save().map_err(on_error)?;
        report.modified(doc.path().to_path_buf());
        Ok(())
    }
}

fn read_version(doc: &PropertyDocument, key: &str) -> RunnerResult<Version> {
    let stage = BumpStage::ResolveVersions;
    let text = doc
        .get(key)
        .map_err(|source| RunnerError::Artifact { stage, source })?;
    Version::parse(&text).map_err(|source| RunnerError::InvalidStoredVersion {
        stage,
        key: key.to_string(),
        path: doc.path().display().to_string(),
        source,
    })
}

fn artifact(stage: BumpStage) -> impl Fn(ArtifactError) -> RunnerError + Copy {
    move |source| RunnerError::Artifact { stage, source }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
