//! Dependency edges produced by resolving one configuration.
//!
//! The resolver that produces them lives outside this crate. It hands over any
//! [`ResolutionResult`]; [`ResolutionReport`] is the TOML-backed implementation
//! used by the command line.

use serde::{Deserialize, Serialize};

use crate::model::ParseError;

/// What a dependency declaration asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ComponentSelector {
    /// An external module, addressable by group and name. Either part may be
    /// absent when the declaration did not provide it; an empty group is valid.
    Module {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        module: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version: Option<String>,
    },
    /// Another project of the same build.
    Project { path: String },
    /// Anything else, e.g. a file dependency.
    Other { display_name: String },
}

/// The component the resolver picked for a requested dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleVersion {
    pub group: String,
    pub module: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DependencyOutcome {
    Resolved { selected: ModuleVersion },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyResult {
    pub requested: ComponentSelector,
    #[serde(flatten)]
    pub outcome: DependencyOutcome,
}

impl DependencyResult {
    pub fn resolved(requested: ComponentSelector, selected: ModuleVersion) -> Self {
        DependencyResult {
            requested,
            outcome: DependencyOutcome::Resolved { selected },
        }
    }

    pub fn failed(requested: ComponentSelector, reason: impl Into<String>) -> Self {
        DependencyResult {
            requested,
            outcome: DependencyOutcome::Failed {
                reason: reason.into(),
            },
        }
    }
}

pub trait ResolutionResult {
    /// Every dependency edge of the resolved configuration, in no particular order.
    fn all_dependencies(&self) -> impl Iterator<Item = &DependencyResult> + '_;
}

impl ResolutionResult for [DependencyResult] {
    fn all_dependencies(&self) -> impl Iterator<Item = &DependencyResult> + '_ {
        self.iter()
    }
}

impl ResolutionResult for Vec<DependencyResult> {
    fn all_dependencies(&self) -> impl Iterator<Item = &DependencyResult> + '_ {
        self.iter()
    }
}

/// Resolution outcome of one configuration, as written by a build tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub project: String,
    pub configuration: String,
    #[serde(default)]
    pub dependencies: Vec<DependencyResult>,
}

impl ResolutionReport {
    pub fn from_str(s: &str) -> Result<ResolutionReport, ParseError> {
        toml::from_str(s).map_err(Into::into)
    }
}

impl ResolutionResult for ResolutionReport {
    fn all_dependencies(&self) -> impl Iterator<Item = &DependencyResult> + '_ {
        self.dependencies.iter()
    }
}
