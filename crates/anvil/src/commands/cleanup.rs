//! Cleanup command

use anyhow::Result;

use crate::cli::CleanupArgs;
use crate::commands::default_workdir;

pub async fn run(args: CleanupArgs) -> Result<()> {
    let work_dir = args
        .workdir
        .map(|dir| dir.into_std_path_buf())
        .unwrap_or_else(default_workdir);

    anvil_bundle::session::cleanup(&work_dir, &args.session_id);
    println!("Session {} cleaned up", args.session_id);
    Ok(())
}
