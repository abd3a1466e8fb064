//! Inventory builders: hosts-file stanzas and per-group variable files

use crate::error::Result;
use anvil_core::{OsPlatform, VmGroup};
use anvil_store::RoleStore;

/// Fixed header of every generated group-variables file
pub const GROUP_VARS_HEADER: &str = "---\n# Ansible role variables\n\n";

/// Append a group stanza to a hosts file.
///
/// Groups of one composite environment accumulate into a single file in
/// request order; later groups append, never overwrite. `existing` is the
/// empty string for the first group.
pub fn build_hosts(existing: &str, group_name: &str, hostnames: &[String]) -> String {
    let mut content = String::with_capacity(existing.len() + group_name.len() + 64);
    content.push_str(existing);
    content.push('\n');
    content.push('[');
    content.push_str(group_name);
    content.push_str("]\n");
    content.push_str(&hostnames.join("\n"));
    content.push('\n');
    content
}

/// Build the variable file for one VM group.
///
/// Role variable blocks are emitted in role order; a role with no stored
/// variables for the platform is silently skipped.
pub fn build_group_vars<S: RoleStore>(
    store: &S,
    group: &VmGroup,
    os_platform: OsPlatform,
) -> Result<String> {
    let mut content = String::from(GROUP_VARS_HEADER);

    for role_id in &group.roles {
        match store.role_variable(*role_id, os_platform)? {
            Some(entry) => {
                content.push_str("# Variables for role: ");
                content.push_str(&entry.role_name);
                content.push('\n');
                content.push_str(&entry.content);
                content.push_str("\n\n");
            }
            None => {
                tracing::debug!(role_id = *role_id, platform = %os_platform, "no variables stored for role");
            }
        }
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvil_store::{MemoryStore, Role, RoleVariable};

    fn hosts(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn store_with_variables() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert_role(Role {
            id: 5,
            name: "patching".to_string(),
            os_platform: OsPlatform::Linux,
            requires_ldap: false,
        });
        store.insert_role(Role {
            id: 7,
            name: "hardening".to_string(),
            os_platform: OsPlatform::Linux,
            requires_ldap: false,
        });
        store.insert_role_variable(RoleVariable {
            role_id: 5,
            os_platform: OsPlatform::Linux,
            content: "patch_window: sunday".to_string(),
        });
        store.insert_role_variable(RoleVariable {
            role_id: 7,
            os_platform: OsPlatform::Linux,
            content: "cis_level: 2".to_string(),
        });
        store
    }

    fn group(roles: Vec<i64>) -> VmGroup {
        VmGroup {
            group_number: 1,
            region: None,
            hostnames: hosts(&["host1"]),
            roles,
            os_platform: None,
        }
    }

    #[test]
    fn test_build_hosts_first_group() {
        let content = build_hosts("", "dev_group1", &hosts(&["host1", "host2"]));
        assert_eq!(content, "\n[dev_group1]\nhost1\nhost2\n");
    }

    #[test]
    fn test_build_hosts_appends_without_losing_stanzas() {
        let first = build_hosts("", "dev_group1", &hosts(&["host1"]));
        let second = build_hosts(&first, "dev_group2", &hosts(&["host2"]));
        assert_eq!(second, "\n[dev_group1]\nhost1\n\n[dev_group2]\nhost2\n");
    }

    #[test]
    fn test_group_vars_emits_blocks_in_role_order() {
        let store = store_with_variables();
        let content = build_group_vars(&store, &group(vec![7, 5]), OsPlatform::Linux).unwrap();

        assert!(content.starts_with(GROUP_VARS_HEADER));
        let hardening = content.find("# Variables for role: hardening").unwrap();
        let patching = content.find("# Variables for role: patching").unwrap();
        assert!(hardening < patching);
        assert!(content.contains("cis_level: 2"));
        assert!(content.contains("patch_window: sunday"));
    }

    #[test]
    fn test_group_vars_skips_roles_without_variables() {
        let store = store_with_variables();
        // Role 99 is unknown, role 5 on Windows has no stored block
        let content = build_group_vars(&store, &group(vec![99, 5]), OsPlatform::Windows).unwrap();
        assert_eq!(content, GROUP_VARS_HEADER);
    }
}
