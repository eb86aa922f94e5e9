pub mod lock;
pub mod lock_file;

use std::{fmt::Display, str::FromStr};

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid module key: {0} is missing")]
    InvalidKey(&'static str),
    #[error("Invalid module notation `{0}`, expected `group:name`")]
    InvalidNotation(String),
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Lock file version is missing")]
    MissingLockFileVersion,
    #[error("Unsupported lock file version {0}")]
    UnsupportedLockFileVersion(toml::Value),
}

/// Identity of an external module, independent of its version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct ModuleKey {
    group: String,
    name: String,
}

impl ModuleKey {
    /// Group and name are opaque; an empty group is valid (e.g. flat directory modules).
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        ModuleKey {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Builds a key from a selector whose parts may not have been provided at all.
    pub fn from_parts(group: Option<&str>, name: Option<&str>) -> Result<Self, ModelError> {
        match (group, name) {
            (None, _) => Err(ModelError::InvalidKey("group")),
            (_, None) => Err(ModelError::InvalidKey("name")),
            (Some(group), Some(name)) => Ok(ModuleKey::new(group, name)),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for ModuleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

impl FromStr for ModuleKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((group, name)) if !name.is_empty() && !name.contains(':') => {
                Ok(ModuleKey::new(group, name))
            }
            _ => Err(ModelError::InvalidNotation(s.to_string())),
        }
    }
}

/// The version a module was asked for and the version the build selected.
///
/// `requested` is absent when the declaration carried no version (or an empty one).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyVersion {
    requested: Option<String>,
    resolved: String,
}

impl DependencyVersion {
    pub fn new(requested: Option<String>, resolved: impl Into<String>) -> Self {
        DependencyVersion {
            requested: requested.filter(|requested| !requested.is_empty()),
            resolved: resolved.into(),
        }
    }

    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    pub fn resolved(&self) -> &str {
        &self.resolved
    }
}

impl Display for DependencyVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.requested {
            Some(requested) if requested != &self.resolved => {
                write!(f, "{} -> {}", requested, self.resolved)
            }
            _ => f.write_str(&self.resolved),
        }
    }
}

/// One dependency scope of one project in the build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct ConfigurationKey {
    project_path: String,
    configuration_name: String,
}

impl ConfigurationKey {
    pub fn new(project_path: impl Into<String>, configuration_name: impl Into<String>) -> Self {
        ConfigurationKey {
            project_path: project_path.into(),
            configuration_name: configuration_name.into(),
        }
    }

    pub fn project_path(&self) -> &str {
        &self.project_path
    }

    pub fn configuration_name(&self) -> &str {
        &self.configuration_name
    }
}

impl Display for ConfigurationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.project_path, self.configuration_name)
    }
}
