//! Region grouping for VM groups
//!
//! Buckets are keyed by region tag (empty string for "no region") in
//! first-seen order; the original relative order of groups is preserved
//! within each bucket. Hosts files and playbooks are namespaced per
//! bucket, so the iteration order here is the section order of the
//! generated pipeline.

use crate::types::VmGroup;

/// Partition VM groups by region tag.
pub fn group_by_region(vm_groups: &[VmGroup]) -> Vec<(String, Vec<&VmGroup>)> {
    let mut buckets: Vec<(String, Vec<&VmGroup>)> = Vec::new();

    for group in vm_groups {
        let key = group.region_key();
        match buckets.iter_mut().find(|(region, _)| region == key) {
            Some((_, members)) => members.push(group),
            None => buckets.push((key.to_string(), vec![group])),
        }
    }

    buckets
}
