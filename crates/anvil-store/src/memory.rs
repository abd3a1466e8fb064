//! In-memory store implementation and its YAML loader
//!
//! The store file is one YAML document with a section per record family:
//!
//! ```yaml
//! os_defaults:
//!   Linux: |
//!     ansible_become_user: root
//! requirements:
//!   all: |
//!     ---
//! ci_fragments:
//!   - kind: common
//!     content: |
//!       stages: [.pre]
//! roles:
//!   - id: 5
//!     name: patching
//!     os_platform: Linux
//!     requires_ldap: false
//! role_variables:
//!   - role_id: 5
//!     os_platform: Linux
//!     content: |
//!       patch_window: sunday
//! ```

use crate::error::{Error, Result};
use crate::store::{FragmentStore, RoleStore};
use crate::types::{
    CiFragment, CiFragmentFilter, RequirementsScope, Role, RoleVariable, RoleVariableEntry,
};
use anvil_core::{Environment, OsPlatform};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// On-disk shape of the store file
#[derive(Debug, Default, Deserialize)]
struct StoreFile {
    #[serde(default)]
    os_defaults: HashMap<OsPlatform, String>,

    #[serde(default)]
    requirements: HashMap<RequirementsScope, String>,

    #[serde(default)]
    ci_fragments: Vec<CiFragment>,

    #[serde(default)]
    roles: Vec<Role>,

    #[serde(default)]
    role_variables: Vec<RoleVariable>,
}

/// HashMap-backed configuration store
///
/// Used directly in tests and assembled from a YAML store file for the
/// CLI. Inserts are last-write-wins on the record's unique key.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    os_defaults: HashMap<OsPlatform, String>,
    requirements: HashMap<RequirementsScope, String>,
    ci_fragments: Vec<CiFragment>,
    roles: HashMap<i64, Role>,
    role_variables: HashMap<(i64, OsPlatform), String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a YAML file
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::store_not_found(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load a store from YAML content
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: StoreFile = serde_yaml_ng::from_str(content)?;

        let mut store = Self::new();
        for (platform, default) in file.os_defaults {
            store.insert_os_default(platform, default);
        }
        for (scope, template) in file.requirements {
            store.insert_requirements(scope, template);
        }
        for fragment in file.ci_fragments {
            store.insert_ci_fragment(fragment);
        }
        for role in file.roles {
            store.insert_role(role);
        }
        for variable in file.role_variables {
            if !store.roles.contains_key(&variable.role_id) {
                return Err(Error::invalid_store(format!(
                    "role variable references unknown role {}",
                    variable.role_id
                )));
            }
            store.insert_role_variable(variable);
        }

        tracing::debug!(
            roles = store.roles.len(),
            fragments = store.ci_fragments.len(),
            "loaded configuration store"
        );
        Ok(store)
    }

    /// Insert or replace the defaults for a platform
    pub fn insert_os_default(&mut self, os_platform: OsPlatform, content: impl Into<String>) {
        self.os_defaults.insert(os_platform, content.into());
    }

    /// Insert or replace the requirements template for a scope
    pub fn insert_requirements(&mut self, scope: RequirementsScope, content: impl Into<String>) {
        self.requirements.insert(scope, content.into());
    }

    /// Append a CI fragment
    pub fn insert_ci_fragment(&mut self, fragment: CiFragment) {
        self.ci_fragments.push(fragment);
    }

    /// Insert or replace a role by ID
    pub fn insert_role(&mut self, role: Role) {
        self.roles.insert(role.id, role);
    }

    /// Insert or replace a role's variable block for a platform
    pub fn insert_role_variable(&mut self, variable: RoleVariable) {
        self.role_variables
            .insert((variable.role_id, variable.os_platform), variable.content);
    }
}

impl FragmentStore for MemoryStore {
    fn os_default(&self, os_platform: OsPlatform) -> Result<Option<String>> {
        Ok(self.os_defaults.get(&os_platform).cloned())
    }

    fn requirements_template(&self, environment: Environment) -> Result<Option<String>> {
        let scoped = self.requirements.get(&RequirementsScope::from(environment));
        Ok(scoped
            .or_else(|| self.requirements.get(&RequirementsScope::All))
            .cloned())
    }

    fn ci_fragment(&self, filter: &CiFragmentFilter) -> Result<Option<String>> {
        Ok(self
            .ci_fragments
            .iter()
            .find(|fragment| filter.matches(fragment))
            .map(|fragment| fragment.content.clone()))
    }

    fn ci_fragments(&self, filter: &CiFragmentFilter) -> Result<Vec<CiFragment>> {
        Ok(self
            .ci_fragments
            .iter()
            .filter(|fragment| filter.matches(fragment))
            .cloned()
            .collect())
    }
}

impl RoleStore for MemoryStore {
    fn role(&self, id: i64) -> Result<Option<Role>> {
        Ok(self.roles.get(&id).cloned())
    }

    fn role_variable(
        &self,
        role_id: i64,
        os_platform: OsPlatform,
    ) -> Result<Option<RoleVariableEntry>> {
        let Some(role) = self.roles.get(&role_id) else {
            return Ok(None);
        };
        Ok(self
            .role_variables
            .get(&(role_id, os_platform))
            .map(|content| RoleVariableEntry {
                role_name: role.name.clone(),
                content: content.clone(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CiFragmentKind;

    fn role(id: i64, name: &str, requires_ldap: bool) -> Role {
        Role {
            id,
            name: name.to_string(),
            os_platform: OsPlatform::Linux,
            requires_ldap,
        }
    }

    #[test]
    fn test_os_default_lookup() {
        let mut store = MemoryStore::new();
        store.insert_os_default(OsPlatform::Linux, "linux defaults");

        assert_eq!(
            store.os_default(OsPlatform::Linux).unwrap().as_deref(),
            Some("linux defaults")
        );
        assert!(store.os_default(OsPlatform::Windows).unwrap().is_none());
    }

    #[test]
    fn test_requirements_falls_back_to_all_scope() {
        let mut store = MemoryStore::new();
        store.insert_requirements(RequirementsScope::All, "shared");
        store.insert_requirements(RequirementsScope::Uat, "uat specific");

        assert_eq!(
            store
                .requirements_template(Environment::Uat)
                .unwrap()
                .as_deref(),
            Some("uat specific")
        );
        assert_eq!(
            store
                .requirements_template(Environment::Dev)
                .unwrap()
                .as_deref(),
            Some("shared")
        );
    }

    #[test]
    fn test_requirements_absent_when_no_scope_matches() {
        let store = MemoryStore::new();
        assert!(store
            .requirements_template(Environment::Prod)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_ci_fragment_first_match() {
        let mut store = MemoryStore::new();
        store.insert_ci_fragment(CiFragment {
            kind: CiFragmentKind::Common,
            environment: None,
            os_platform: None,
            role_id: None,
            content: "first".to_string(),
        });
        store.insert_ci_fragment(CiFragment {
            kind: CiFragmentKind::Common,
            environment: None,
            os_platform: None,
            role_id: None,
            content: "second".to_string(),
        });

        let filter = CiFragmentFilter::kind(CiFragmentKind::Common);
        assert_eq!(store.ci_fragment(&filter).unwrap().as_deref(), Some("first"));
        assert_eq!(store.ci_fragments(&filter).unwrap().len(), 2);
    }

    #[test]
    fn test_role_variable_joins_role_name() {
        let mut store = MemoryStore::new();
        store.insert_role(role(5, "patching", false));
        store.insert_role_variable(RoleVariable {
            role_id: 5,
            os_platform: OsPlatform::Linux,
            content: "patch_window: sunday".to_string(),
        });

        let entry = store
            .role_variable(5, OsPlatform::Linux)
            .unwrap()
            .expect("entry");
        assert_eq!(entry.role_name, "patching");
        assert_eq!(entry.content, "patch_window: sunday");

        // Same role, other platform: no variable block stored
        assert!(store.role_variable(5, OsPlatform::Windows).unwrap().is_none());
        // Unknown role
        assert!(store.role_variable(99, OsPlatform::Linux).unwrap().is_none());
    }

    #[test]
    fn test_from_yaml_str_round_trip() {
        let yaml = r#"
os_defaults:
  Linux: linux content
requirements:
  all: req content
ci_fragments:
  - kind: common
    content: common block
roles:
  - id: 5
    name: patching
    os_platform: Linux
    requires_ldap: true
role_variables:
  - role_id: 5
    os_platform: Linux
    content: "patch_window: sunday"
"#;
        let store = MemoryStore::from_yaml_str(yaml).unwrap();
        assert!(store.role(5).unwrap().expect("role").requires_ldap);
        assert_eq!(
            store.os_default(OsPlatform::Linux).unwrap().as_deref(),
            Some("linux content")
        );
        assert!(store
            .ci_fragment(&CiFragmentFilter::kind(CiFragmentKind::Common))
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_from_yaml_str_rejects_orphan_role_variable() {
        let yaml = r#"
role_variables:
  - role_id: 42
    os_platform: Linux
    content: orphan
"#;
        let err = MemoryStore::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("unknown role 42"));
    }

    #[test]
    fn test_from_yaml_missing_file() {
        let err = MemoryStore::from_yaml(Path::new("/nonexistent/store.yaml")).unwrap_err();
        assert!(matches!(err, Error::StoreNotFound { .. }));
    }

    #[test]
    fn test_from_yaml_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.yaml");
        std::fs::write(&path, "os_defaults:\n  Windows: winrm config\n").unwrap();

        let store = MemoryStore::from_yaml(&path).unwrap();
        assert_eq!(
            store.os_default(OsPlatform::Windows).unwrap().as_deref(),
            Some("winrm config")
        );
    }

    #[test]
    fn test_insert_is_last_write_wins() {
        let mut store = MemoryStore::new();
        store.insert_role(role(1, "old", false));
        store.insert_role(role(1, "new", true));

        let role = store.role(1).unwrap().expect("role");
        assert_eq!(role.name, "new");
        assert!(role.requires_ldap);
    }
}
