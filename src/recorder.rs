use log::{debug, trace, warn};
use thiserror::Error;

use crate::{
    model::{lock::DependencyLock, DependencyVersion, ModuleKey},
    resolution::{ComponentSelector, DependencyOutcome, ResolutionResult},
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("Invalid argument: {0} must not be empty")]
    InvalidArgument(&'static str),
}

/// What happened to the edges of one recorded resolution outcome.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RecordSummary {
    pub recorded: usize,
    pub unresolved: usize,
    pub not_modules: usize,
    pub rejected: usize,
}

/// Records successful module resolutions into a shared [`DependencyLock`].
#[derive(Debug, Default)]
pub struct LockRecorder {
    lock: DependencyLock,
}

impl LockRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every successfully resolved module edge of `result` under the
    /// given project and configuration.
    ///
    /// Failed edges, project references and other non-module selectors are skipped.
    /// An edge whose module key is invalid is skipped as well; the remaining edges
    /// are still recorded.
    pub fn resolve_and_persist<R>(
        &self,
        project_path: &str,
        configuration_name: &str,
        result: &R,
    ) -> Result<RecordSummary, RecordError>
    where
        R: ResolutionResult + ?Sized,
    {
        if project_path.is_empty() {
            return Err(RecordError::InvalidArgument("project path"));
        }
        if configuration_name.is_empty() {
            return Err(RecordError::InvalidArgument("configuration name"));
        }

        let mut summary = RecordSummary::default();
        for dependency in result.all_dependencies() {
            match (&dependency.requested, &dependency.outcome) {
                (requested, DependencyOutcome::Failed { reason }) => {
                    trace!("Skipping unresolved {:?}: {}", requested, reason);
                    summary.unresolved += 1;
                }
                (
                    ComponentSelector::Module {
                        group,
                        module,
                        version,
                    },
                    DependencyOutcome::Resolved { selected },
                ) => match ModuleKey::from_parts(group.as_deref(), module.as_deref()) {
                    Ok(key) => {
                        let version = DependencyVersion::new(version.clone(), &selected.version);
                        self.lock
                            .add_dependency(project_path, configuration_name, key, version);
                        summary.recorded += 1;
                    }
                    Err(error) => {
                        warn!(
                            "Not locking {:?} in {} ({}): {}",
                            dependency.requested, project_path, configuration_name, error
                        );
                        summary.rejected += 1;
                    }
                },
                (requested, DependencyOutcome::Resolved { .. }) => {
                    trace!("Skipping non-module dependency {:?}", requested);
                    summary.not_modules += 1;
                }
            }
        }

        debug!(
            "Recorded {} dependencies of {} ({}), skipped {} unresolved, {} non-module and {} invalid",
            summary.recorded,
            project_path,
            configuration_name,
            summary.unresolved,
            summary.not_modules,
            summary.rejected
        );
        Ok(summary)
    }

    pub fn dependency_lock(&self) -> &DependencyLock {
        &self.lock
    }

    pub fn into_dependency_lock(self) -> DependencyLock {
        self.lock
    }
}
