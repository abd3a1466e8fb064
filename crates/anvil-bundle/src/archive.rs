//! Archive creation for generated bundles
//!
//! The bundle tree is streamed into a gzip-compressed tar archive whose
//! single top-level entry is the fixed template root, so extraction
//! always yields an `Ansible-Template/` directory.

use crate::session::TEMPLATE_ROOT;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::path::Path;
use tar::Builder as TarBuilder;

/// Default gzip compression level
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Write `template_dir` into a tar.gz archive at `archive_path`.
pub fn write_archive(
    template_dir: &Path,
    archive_path: &Path,
    compression_level: u32,
) -> std::io::Result<()> {
    let file = File::create(archive_path)?;
    let encoder = GzEncoder::new(file, Compression::new(compression_level));
    let mut tar = TarBuilder::new(encoder);

    tar.append_dir_all(TEMPLATE_ROOT, template_dir)?;

    let encoder = tar.into_inner()?;
    encoder.finish()?;
    Ok(())
}
