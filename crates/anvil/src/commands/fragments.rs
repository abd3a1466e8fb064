//! Fragments command: list stored CI fragments

use anyhow::{Context, Result};
use anvil_store::{CiFragmentFilter, FragmentStore, MemoryStore};
use tabled::{Table, Tabled};

use crate::cli::FragmentsArgs;

#[derive(Tabled)]
struct FragmentRow {
    #[tabled(rename = "Kind")]
    kind: String,

    #[tabled(rename = "Environment")]
    environment: String,

    #[tabled(rename = "Platform")]
    platform: String,

    #[tabled(rename = "Role")]
    role: String,

    #[tabled(rename = "Lines")]
    lines: usize,
}

pub async fn run(args: FragmentsArgs) -> Result<()> {
    let store = MemoryStore::from_yaml(args.store.as_std_path())
        .with_context(|| format!("Failed to load store from {}", args.store))?;

    let filter = CiFragmentFilter {
        kind: args.kind.map(|kind| kind.to_lib_kind()),
        ..Default::default()
    };

    let fragments = store.ci_fragments(&filter)?;
    if fragments.is_empty() {
        println!("No CI fragments found");
        return Ok(());
    }

    let rows: Vec<FragmentRow> = fragments
        .iter()
        .map(|fragment| FragmentRow {
            kind: fragment.kind.to_string(),
            environment: fragment
                .environment
                .map(|e| e.to_string())
                .unwrap_or_else(|| "-".to_string()),
            platform: fragment
                .os_platform
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            role: fragment
                .role_id
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
            lines: fragment.content.lines().count(),
        })
        .collect();

    println!("{}", Table::new(rows));
    Ok(())
}
