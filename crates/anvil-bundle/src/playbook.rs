//! Playbook builders: per-group playbooks and the aggregate playbook

use anvil_core::naming;
use anvil_core::OsPlatform;

/// Build the playbook for one VM group.
///
/// Role order is execution order and is preserved exactly as supplied.
/// Windows escalates with `become_method: runas`; everything else uses
/// `become: yes`.
pub fn build_group_playbook(
    group_name: &str,
    composite_env: &str,
    os_platform: OsPlatform,
    roles: &[i64],
) -> String {
    let become_clause = match os_platform {
        OsPlatform::Windows => "  become_method: runas",
        _ => "  become: yes",
    };

    let mut content = format!("- hosts: {group_name}\n");
    content.push_str("  gather_facts: true\n");
    content.push_str(become_clause);
    content.push('\n');
    content.push_str("  strategy: free\n");
    content.push_str("  vars_files:\n");
    content.push_str(&format!(
        "    - inventories/{composite_env}/group_vars/{group_name}.yml\n"
    ));
    content.push('\n');
    content.push_str("  roles:\n");
    for role in roles {
        content.push_str(&format!("    - shared_roles/{os_platform}/{role}\n"));
    }

    content
}

/// Build the aggregate playbook importing every group playbook of a
/// composite environment, in group order.
///
/// Only meaningful when the composite environment has more than one
/// group; the planner does not call this otherwise.
pub fn build_aggregate_playbook(group_names: &[String]) -> String {
    let mut content =
        String::from("---\n# Main playbook that includes all VM group playbooks\n");
    for group_name in group_names {
        content.push_str(&format!(
            "- import_playbook: {}\n",
            naming::playbook_file_name(group_name)
        ));
    }
    content
}
