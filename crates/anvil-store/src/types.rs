//! Record types stored by the configuration store

use anvil_core::{Environment, OsPlatform};
use serde::{Deserialize, Serialize};

/// Scope of a requirements template record
///
/// `All` records serve any environment without an environment-specific
/// record of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementsScope {
    Dev,
    It,
    Uat,
    Prod,
    All,
}

impl From<Environment> for RequirementsScope {
    fn from(environment: Environment) -> Self {
        match environment {
            Environment::Dev => RequirementsScope::Dev,
            Environment::It => RequirementsScope::It,
            Environment::Uat => RequirementsScope::Uat,
            Environment::Prod => RequirementsScope::Prod,
        }
    }
}

/// Kind of a stored CI fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CiFragmentKind {
    /// Shared pipeline preamble, emitted once at the top of every bundle
    Common,
    /// Environment-scoped fragment
    Environment,
    /// Role-scoped fragment
    Role,
}

impl std::fmt::Display for CiFragmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CiFragmentKind::Common => write!(f, "common"),
            CiFragmentKind::Environment => write!(f, "environment"),
            CiFragmentKind::Role => write!(f, "role"),
        }
    }
}

/// A stored GitLab CI fragment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CiFragment {
    pub kind: CiFragmentKind,

    #[serde(default)]
    pub environment: Option<Environment>,

    #[serde(default)]
    pub os_platform: Option<OsPlatform>,

    #[serde(default)]
    pub role_id: Option<i64>,

    pub content: String,
}

/// Filter for CI fragment lookups; unset fields match any record
#[derive(Debug, Clone, Default)]
pub struct CiFragmentFilter {
    pub kind: Option<CiFragmentKind>,
    pub environment: Option<Environment>,
    pub os_platform: Option<OsPlatform>,
    pub role_id: Option<i64>,
}

impl CiFragmentFilter {
    /// Filter matching all fragments of one kind
    pub fn kind(kind: CiFragmentKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Narrow the filter to one environment
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Narrow the filter to one platform
    pub fn with_os_platform(mut self, os_platform: OsPlatform) -> Self {
        self.os_platform = Some(os_platform);
        self
    }

    /// Whether a fragment satisfies every set constraint
    pub fn matches(&self, fragment: &CiFragment) -> bool {
        self.kind.map_or(true, |k| fragment.kind == k)
            && self.environment.map_or(true, |e| fragment.environment == Some(e))
            && self
                .os_platform
                .map_or(true, |p| fragment.os_platform == Some(p))
            && self.role_id.map_or(true, |r| fragment.role_id == Some(r))
    }
}

/// A provisioning role, unique on (name, platform)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub os_platform: OsPlatform,

    /// Whether deploying this role needs the LDAP secret replicated first
    #[serde(default)]
    pub requires_ldap: bool,
}

/// A stored variable block for a (role, platform) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleVariable {
    pub role_id: i64,
    pub os_platform: OsPlatform,
    pub content: String,
}

/// A resolved role-variable lookup: the variable block joined with the
/// owning role's name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleVariableEntry {
    pub role_name: String,
    pub content: String,
}
