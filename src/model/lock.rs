use std::collections::BTreeMap;

use dashmap::DashMap;
use log::trace;

use super::{ConfigurationKey, DependencyVersion, ModuleKey};

pub type ModuleVersions = BTreeMap<ModuleKey, DependencyVersion>;

/// Lock state of one build session while configurations are being recorded.
///
/// Writers only need `&self`, so a single instance can be shared between threads
/// that resolve configurations in parallel. Once recording is done the state is
/// frozen with [`DependencyLock::into_snapshot`].
#[derive(Debug, Default)]
pub struct DependencyLock {
    configurations: DashMap<ConfigurationKey, ModuleVersions>,
}

impl DependencyLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `version` for `module` in the given configuration, returning the
    /// version it replaces, if any.
    pub fn add_dependency(
        &self,
        project_path: &str,
        configuration_name: &str,
        module: ModuleKey,
        version: DependencyVersion,
    ) -> Option<DependencyVersion> {
        let configuration = ConfigurationKey::new(project_path, configuration_name);
        trace!("Locking {} in {} at {}", module, configuration, version);
        self.configurations
            .entry(configuration)
            .or_default()
            .insert(module, version)
    }

    pub fn get(
        &self,
        configuration: &ConfigurationKey,
        module: &ModuleKey,
    ) -> Option<DependencyVersion> {
        self.configurations
            .get(configuration)
            .and_then(|modules| modules.get(module).cloned())
    }

    pub fn len(&self) -> usize {
        self.configurations
            .iter()
            .map(|modules| modules.value().len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries recorded so far, in key order.
    pub fn entries(
        &self,
    ) -> impl Iterator<Item = (ConfigurationKey, ModuleKey, DependencyVersion)> {
        self.snapshot()
            .configurations
            .into_iter()
            .flat_map(|(configuration, modules)| {
                modules
                    .into_iter()
                    .map(move |(module, version)| (configuration.clone(), module, version))
            })
    }

    pub fn snapshot(&self) -> LockSnapshot {
        let configurations = self
            .configurations
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        LockSnapshot { configurations }
    }

    pub fn into_snapshot(self) -> LockSnapshot {
        LockSnapshot {
            configurations: self.configurations.into_iter().collect(),
        }
    }
}

/// Read-only lock state handed over to persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockSnapshot {
    configurations: BTreeMap<ConfigurationKey, ModuleVersions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEntry<'a> {
    pub configuration: &'a ConfigurationKey,
    pub module: &'a ModuleKey,
    pub version: &'a DependencyVersion,
}

impl LockSnapshot {
    pub(crate) fn from_configurations(
        configurations: BTreeMap<ConfigurationKey, ModuleVersions>,
    ) -> Self {
        LockSnapshot { configurations }
    }

    /// Entries ordered by configuration, then module. Can be iterated any number of times.
    pub fn entries(&self) -> impl Iterator<Item = LockEntry<'_>> + '_ {
        self.configurations
            .iter()
            .flat_map(|(configuration, modules)| {
                modules.iter().map(move |(module, version)| LockEntry {
                    configuration,
                    module,
                    version,
                })
            })
    }

    pub fn configurations(&self) -> impl Iterator<Item = (&ConfigurationKey, &ModuleVersions)> {
        self.configurations.iter()
    }

    pub fn get(
        &self,
        configuration: &ConfigurationKey,
        module: &ModuleKey,
    ) -> Option<&DependencyVersion> {
        self.configurations
            .get(configuration)
            .and_then(|modules| modules.get(module))
    }

    pub fn len(&self) -> usize {
        self.configurations.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
