use std::fs::File;
use std::path::Path;

use tracing::info;
use zip::ZipArchive;

use crate::error::{ExportError, Result};

/// Decompresses the full contents of an export archive into `destination`.
/// No content validation is performed.
pub fn extract_export_archive(archive_path: &Path, destination: &Path) -> Result<()> {
    if !archive_path.is_file() {
        return Err(ExportError::NotFound {
            path: archive_path.to_path_buf(),
        });
    }

    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;
    let entries = archive.len();
    archive.extract(destination)?;

    info!(
        entries,
        destination = %destination.display(),
        "extracted export archive"
    );
    Ok(())
}
