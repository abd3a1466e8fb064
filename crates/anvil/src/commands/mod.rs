//! Command implementations

pub mod cleanup;
pub mod fragments;
pub mod generate;

use std::path::PathBuf;

/// Default session work directory when --workdir is not given
pub fn default_workdir() -> PathBuf {
    std::env::temp_dir().join("anvil")
}
