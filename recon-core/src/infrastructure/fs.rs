// recon-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Write a file atomically using a temporary file.
///
/// This function:
/// 1. Creates the target's parent directory if needed.
/// 2. Creates a temporary file in that directory and hands it to `write`.
/// 3. Persists (renames) the temporary file to the target path only if `write` succeeded.
///
/// On any error the temporary file is removed and the target is left untouched,
/// so a half-written table never shows up under its final name.
pub fn atomic_write_with<P, F>(path: P, write: F) -> Result<(), InfrastructureError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut File) -> Result<(), InfrastructureError>,
{
    let path = path.as_ref();
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    // Same directory as the target so the rename never crosses filesystems
    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;

    write(temp_file.as_file_mut())?;
    temp_file.as_file_mut().flush()?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Byte-for-byte copy of `source` to `destination`, atomically.
pub fn atomic_copy<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
) -> Result<(), InfrastructureError> {
    let mut input = File::open(source.as_ref())?;
    atomic_write_with(destination, |out| {
        io::copy(&mut input, out)?;
        Ok(())
    })
}

/// Regular file that we are allowed to open.
pub fn is_readable_file(path: &Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}
