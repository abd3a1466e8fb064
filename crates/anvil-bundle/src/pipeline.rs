//! Composite CI pipeline builder
//!
//! The pipeline document is an ordered concatenation: the stored common
//! block first, then per region bucket an optional LDAP secret-replication
//! job, one setup job per VM group, and an aggregate setup job when the
//! composite environment has more than one group.

use crate::error::Result;
use anvil_core::types::supplied;
use anvil_core::{naming, region, TemplateRequest, VmGroup};
use anvil_store::{CiFragmentFilter, CiFragmentKind, FragmentStore, RoleStore};

/// Build the complete `.gitlab-ci.yml` document for a request.
pub fn build_pipeline<S: FragmentStore + RoleStore>(
    store: &S,
    request: &TemplateRequest,
) -> Result<String> {
    let common = store
        .ci_fragment(&CiFragmentFilter::kind(CiFragmentKind::Common))?
        .unwrap_or_default();

    let mut content = common;
    content.push_str("\n\n");

    let replication_requested =
        supplied(&request.source_path).is_some() && supplied(&request.target_identifier).is_some();

    for (region_key, groups) in region::group_by_region(&request.vm_groups) {
        let composite_env = naming::composite_env(request.environment, &region_key);

        if replication_requested && region_requires_ldap(store, &groups)? {
            content.push_str(&ldap_replication_job(request, &region_key));
            content.push('\n');
        }

        for group in &groups {
            content.push_str(&setup_job(
                request,
                &composite_env,
                &format!("group{}", group.group_number),
            ));
            content.push('\n');
        }

        if groups.len() > 1 {
            content.push_str(&setup_job(request, &composite_env, "all"));
            content.push('\n');
        }
    }

    Ok(content)
}

/// Whether any role of any group in the region bucket requires LDAP.
fn region_requires_ldap<S: RoleStore>(store: &S, groups: &[&VmGroup]) -> Result<bool> {
    for group in groups {
        for role_id in &group.roles {
            if let Some(role) = store.role(*role_id)? {
                if role.requires_ldap {
                    return Ok(true);
                }
            }
        }
    }
    Ok(false)
}

/// The LDAP secret-replication job, at most one per composite environment.
fn ldap_replication_job(request: &TemplateRequest, region_key: &str) -> String {
    let environment = request.environment;
    let composite_env = naming::composite_env(environment, region_key);

    let mut job = format!("{}:\n", naming::ldap_job_name(&composite_env));
    job.push_str("  stage: .pre\n");
    job.push_str("  extends: .secret-replicate-ad-template\n");
    job.push_str("  when: manual\n");
    job.push_str("  image:\n");
    job.push_str("  variables:\n");
    job.push_str(&format!("    METTA_APPLICATION: {}\n", request.metta_application));
    job.push_str(&format!("    METTA_COMPONENT: {}\n", request.metta_component));
    job.push_str(&format!("    SHIELD_TEAM: {}\n", request.shield_team));
    job.push_str(&format!("    SHIELD_ENV: {environment}\n"));
    job.push_str(&format!(
        "    APP_CONTEXT_SUBSCRIPTION_NAME: {}\n",
        request.app_context_subscription_name
    ));
    job.push_str(&format!("    APP_CONTEXT_NAME: {}\n", request.app_context_name));
    job.push_str(&format!("    SOURCE_MOUNT: ldap/{environment}/us\n"));
    job.push_str("    ROTATE_PASSWORD: true\n");
    job.push_str("    HCVAULT_PLUGIN_ENABLE_CAR_NAMESPACE:\n");
    job.push_str(&format!(
        "    SOURCE_PATH: {}\n",
        supplied(&request.source_path).unwrap_or_default()
    ));
    job.push_str(&format!(
        "    TARGET_IDENTIFIER: {}\n",
        supplied(&request.target_identifier).unwrap_or_default()
    ));

    if let Some(app_context_region) = app_context_region(region_key) {
        job.push_str(&format!("    APP_CONTEXT_REGION: {app_context_region}\n"));
    }

    if let Some(line) = assignment_group_line(request) {
        job.push_str(&line);
    }

    job
}

/// A setup job for one playbook. `suffix` is `group<N>` or `all`; it picks
/// both the job name and the playbook the job runs.
fn setup_job(request: &TemplateRequest, composite_env: &str, suffix: &str) -> String {
    let job_name = naming::job_name(composite_env, suffix, request.os_platform);
    let playbook_name = naming::playbook_base_name(&format!("{composite_env}_{suffix}"));
    let shield_env = naming::shield_env(composite_env);

    let mut job = format!("{job_name}:\n");
    job.push_str("  stage: .pre\n");
    job.push_str("  extends: .run-ansible\n");
    job.push_str("  when: manual\n");
    job.push_str("  variables:\n");
    job.push_str(&format!("    METTA_APPLICATION: {}\n", request.metta_application));
    job.push_str(&format!("    METTA_COMPONENT: {}\n", request.metta_component));
    job.push_str(&format!("    SHIELD_TEAM: {}\n", request.shield_team));
    job.push_str(&format!("    SHIELD_ENV: {shield_env}\n"));
    job.push_str(&format!(
        "    APP_CONTEXT_SUBSCRIPTION_NAME: {}\n",
        request.app_context_subscription_name
    ));
    job.push_str(&format!("    APP_CONTEXT_NAME: {}\n", request.app_context_name));
    job.push_str(&format!("    PLAYBOOK_NAME: {playbook_name}\n"));
    job.push_str(&format!(
        "    ARM_SUBSCRIPTION_ID: {}\n",
        request.arm_subscription_id
    ));

    if let Some(line) = assignment_group_line(request) {
        job.push_str(&line);
    }

    job
}

/// Azure region name for a region tag; unknown tags emit no line.
fn app_context_region(region_key: &str) -> Option<&'static str> {
    match region_key {
        "cus" => Some("centralus"),
        "eus" => Some("eastus2"),
        _ => None,
    }
}

/// The ASSIGNMENT_GROUP variable line, only when the request supplies a
/// group and the base environment tracks change tickets. Region suffixes
/// never affect the gate.
fn assignment_group_line(request: &TemplateRequest) -> Option<String> {
    let assignment_group = supplied(&request.assignment_group)?;
    if request.environment.requires_assignment_group() {
        Some(format!("    ASSIGNMENT_GROUP: {assignment_group}\n"))
    } else {
        None
    }
}
