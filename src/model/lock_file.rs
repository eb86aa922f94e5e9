use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    lock::{LockSnapshot, ModuleVersions},
    ConfigurationKey, DependencyVersion, ModuleKey, ParseError,
};

/// Persisted form of a [`LockSnapshot`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockFile {
    #[serde(default)]
    pub configurations: Vec<LockedConfiguration>,
}

const VERSION: i64 = 1;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct VersionedLockFile<'a> {
    pub version: i64,
    #[serde(flatten)]
    pub content: &'a LockFile,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockedConfiguration {
    pub project: String,
    pub configuration: String,
    #[serde(default)]
    pub dependencies: Vec<LockedDependency>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockedDependency {
    pub group: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub requested: Option<String>,
    pub resolved: String,
}

impl LockFile {
    pub fn from_str(s: &str) -> Result<LockFile, ParseError> {
        let mut table = toml::from_str::<toml::Table>(s)?;
        match table.remove("version") {
            Some(toml::Value::Integer(VERSION)) => table.try_into::<LockFile>().map_err(Into::into),
            Some(other) => Err(ParseError::UnsupportedLockFileVersion(other)),
            None => Err(ParseError::MissingLockFileVersion),
        }
    }

    pub fn to_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&VersionedLockFile {
            version: VERSION,
            content: self,
        })
    }
}

impl From<&LockSnapshot> for LockFile {
    fn from(snapshot: &LockSnapshot) -> Self {
        let configurations = snapshot
            .configurations()
            .map(|(configuration, modules)| LockedConfiguration {
                project: configuration.project_path().to_string(),
                configuration: configuration.configuration_name().to_string(),
                dependencies: modules
                    .iter()
                    .map(|(module, version)| LockedDependency {
                        group: module.group().to_string(),
                        name: module.name().to_string(),
                        requested: version.requested().map(str::to_string),
                        resolved: version.resolved().to_string(),
                    })
                    .collect(),
            })
            .collect();
        LockFile { configurations }
    }
}

impl From<LockFile> for LockSnapshot {
    fn from(lock_file: LockFile) -> Self {
        let mut configurations = BTreeMap::new();
        // A recorded configuration always has at least one module.
        for locked in lock_file
            .configurations
            .into_iter()
            .filter(|locked| !locked.dependencies.is_empty())
        {
            let modules: &mut ModuleVersions = configurations
                .entry(ConfigurationKey::new(locked.project, locked.configuration))
                .or_default();
            for dependency in locked.dependencies {
                modules.insert(
                    ModuleKey::new(dependency.group, dependency.name),
                    DependencyVersion::new(dependency.requested, dependency.resolved),
                );
            }
        }
        LockSnapshot::from_configurations(configurations)
    }
}
