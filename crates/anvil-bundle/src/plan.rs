//! Bundle planning: compute every file of the tree before any write
//!
//! The planner resolves store fragments and runs the pure builders,
//! producing a [`BundlePlan`] of relative paths and contents. Separating
//! the computation from the filesystem keeps the tree testable without a
//! working directory and guarantees no partially-written output shapes
//! the plan.

use crate::defaults;
use crate::error::Result;
use crate::generator::Step;
use crate::inventory;
use crate::pipeline;
use crate::playbook;
use anvil_core::{naming, region, TemplateRequest};
use anvil_store::{FragmentStore, RoleStore};
use std::path::PathBuf;

/// One file of the planned tree, relative to the archive root
#[derive(Debug, Clone)]
pub struct PlannedFile {
    /// Generation step this file belongs to, for error context
    pub step: Step,
    pub rel_path: PathBuf,
    pub content: String,
}

/// The fully computed bundle tree
#[derive(Debug, Clone, Default)]
pub struct BundlePlan {
    pub files: Vec<PlannedFile>,
}

impl BundlePlan {
    fn push(&mut self, step: Step, rel_path: impl Into<PathBuf>, content: String) {
        self.files.push(PlannedFile {
            step,
            rel_path: rel_path.into(),
            content,
        });
    }

    /// Content of a planned file by its relative path
    pub fn content(&self, rel_path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|file| file.rel_path == PathBuf::from(rel_path))
            .map(|file| file.content.as_str())
    }
}

/// Compute the complete bundle tree for a request.
pub fn plan_bundle<S: FragmentStore + RoleStore>(
    store: &S,
    request: &TemplateRequest,
) -> Result<BundlePlan> {
    let mut plan = BundlePlan::default();

    // Connection defaults for the requested platform
    let os_defaults = match store.os_default(request.os_platform)? {
        Some(content) => content,
        None => {
            tracing::debug!(platform = %request.os_platform, "using built-in OS defaults");
            defaults::os_default(request.os_platform).to_string()
        }
    };
    plan.push(Step::OsDefaults, "ansible/group_vars/all.yml", os_defaults);

    // Requirements template for the environment
    let requirements = match store.requirements_template(request.environment)? {
        Some(content) => content,
        None => {
            tracing::debug!(environment = %request.environment, "using built-in requirements template");
            defaults::REQUIREMENTS_TEMPLATE.to_string()
        }
    };
    plan.push(
        Step::Requirements,
        "ansible/roles/requirements.tmpl",
        requirements,
    );

    // Hosts files accumulate per composite environment in request order
    let mut hosts_files: Vec<(String, String)> = Vec::new();
    for group in &request.vm_groups {
        let composite_env = naming::composite_env(request.environment, group.region_key());
        let group_name = naming::group_name(&composite_env, group.group_number);

        match hosts_files.iter_mut().find(|(env, _)| *env == composite_env) {
            Some((_, content)) => {
                *content = inventory::build_hosts(content, &group_name, &group.hostnames);
            }
            None => {
                let content = inventory::build_hosts("", &group_name, &group.hostnames);
                hosts_files.push((composite_env, content));
            }
        }
    }
    for (composite_env, content) in hosts_files {
        plan.push(
            Step::HostsAndPlaybooks,
            format!("ansible/inventories/{composite_env}/hosts"),
            content,
        );
    }

    // Per-group playbooks, plus an aggregate when a composite environment
    // has more than one group
    for (region_key, groups) in region::group_by_region(&request.vm_groups) {
        let composite_env = naming::composite_env(request.environment, &region_key);
        let mut group_names = Vec::with_capacity(groups.len());

        for group in &groups {
            let group_name = naming::group_name(&composite_env, group.group_number);
            let content = playbook::build_group_playbook(
                &group_name,
                &composite_env,
                request.os_platform,
                &group.roles,
            );
            plan.push(
                Step::HostsAndPlaybooks,
                format!("ansible/{}", naming::playbook_file_name(&group_name)),
                content,
            );
            group_names.push(group_name);
        }

        if groups.len() > 1 {
            let aggregate_name = format!("{composite_env}_all");
            plan.push(
                Step::HostsAndPlaybooks,
                format!("ansible/{}", naming::playbook_file_name(&aggregate_name)),
                playbook::build_aggregate_playbook(&group_names),
            );
        }
    }

    // Per-group variable files
    for group in &request.vm_groups {
        let composite_env = naming::composite_env(request.environment, group.region_key());
        let group_name = naming::group_name(&composite_env, group.group_number);
        let content = inventory::build_group_vars(
            store,
            group,
            group.effective_platform(request.os_platform),
        )?;
        plan.push(
            Step::GroupVars,
            format!("ansible/inventories/{composite_env}/group_vars/{group_name}.yml"),
            content,
        );
    }

    // Composite CI pipeline
    plan.push(
        Step::Pipeline,
        ".gitlab-ci.yml",
        pipeline::build_pipeline(store, request)?,
    );

    Ok(plan)
}
