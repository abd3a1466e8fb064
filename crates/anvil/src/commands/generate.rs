//! Generate command

use anyhow::{Context, Result};
use anvil_bundle::BundleGenerator;
use anvil_core::TemplateRequest;
use anvil_store::MemoryStore;

use crate::cli::GenerateArgs;
use crate::commands::default_workdir;

pub async fn run(args: GenerateArgs) -> Result<()> {
    let store = MemoryStore::from_yaml(args.store.as_std_path())
        .with_context(|| format!("Failed to load store from {}", args.store))?;

    let raw = std::fs::read_to_string(args.request.as_std_path())
        .with_context(|| format!("Failed to read request file {}", args.request))?;
    let request = if args.request.extension() == Some("json") {
        TemplateRequest::from_json(&raw)?
    } else {
        TemplateRequest::from_yaml(&raw)?
    };

    let work_dir = args
        .workdir
        .map(|dir| dir.into_std_path_buf())
        .unwrap_or_else(default_workdir);

    let generator =
        BundleGenerator::new(store, work_dir).with_compression_level(args.compression);
    let output = generator.generate(&request).await?;

    std::fs::copy(&output.archive_path, args.output.as_std_path())
        .with_context(|| format!("Failed to copy archive to {}", args.output))?;

    if args.keep {
        tracing::info!(
            session_id = %output.session_id,
            "session kept; remove it later with `anvil cleanup {}`",
            output.session_id
        );
    } else {
        generator.cleanup(&output.session_id);
    }

    println!("Bundle written to {}", args.output);
    Ok(())
}
