//! Deterministic naming rules for generated artifacts
//!
//! Every generator resolves names through this module so that
//! cross-file references (a playbook import, a pipeline PLAYBOOK_NAME
//! variable) always match the file names actually written.

use crate::types::{Environment, OsPlatform};

/// Composite environment name: the environment, suffixed with the region
/// tag when one is present (`uat` + `cus` -> `uat_cus`).
pub fn composite_env(environment: Environment, region: &str) -> String {
    if region.is_empty() {
        environment.to_string()
    } else {
        format!("{environment}_{region}")
    }
}

/// Inventory group name for a VM group within a composite environment.
pub fn group_name(composite_env: &str, group_number: u32) -> String {
    format!("{composite_env}_group{group_number}")
}

/// File name of a group's playbook.
pub fn playbook_file_name(group_name: &str) -> String {
    format!("{group_name}_ansible_playbook.yml")
}

/// Playbook name without extension, as referenced by pipeline jobs.
pub fn playbook_base_name(group_name: &str) -> String {
    format!("{group_name}_ansible_playbook")
}

/// Pipeline setup-job name. `suffix` is `group<N>` for a single group or
/// `all` for the aggregate job.
pub fn job_name(composite_env: &str, suffix: &str, os_platform: OsPlatform) -> String {
    format!(
        "Ansible_{}_{}_Setup_{}",
        capitalize(composite_env),
        suffix,
        os_platform
    )
}

/// Name of the LDAP secret-replication job for a composite environment.
pub fn ldap_job_name(composite_env: &str) -> String {
    format!("{composite_env}-replicate-runtime-ldap-secret")
}

/// Base environment recovered from a composite name (`uat_cus` -> `uat`).
pub fn shield_env(composite_env: &str) -> &str {
    composite_env.split('_').next().unwrap_or(composite_env)
}

/// First character uppercased, remainder unchanged.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
