//! Artifact store
//!
//! Filesystem primitives for provisioning. Nothing here removes or
//! overwrites existing entries: directories are created non-recursively
//! and files with `create_new`. A failed run leaves behind whatever it
//! already created.

use std::fs::{self, DirBuilder, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{ProvisionError, Result};

/// Permissions for created directories (owner only)
pub const DIR_MODE: u32 = 0o700;

/// Permissions for created files (owner read/write)
pub const FILE_MODE: u32 = 0o600;

/// Fail if anything exists at `path`, including a dangling symlink
pub fn ensure_absent(path: &Path) -> Result<()> {
    probe_absent(path, false)
}

/// Same as [`ensure_absent`] for an entry inside an existing MSP root
pub fn ensure_absent_in_msp(path: &Path) -> Result<()> {
    probe_absent(path, true)
}

fn probe_absent(path: &Path, within_msp: bool) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(_) => {
            warn!(path = %path.display(), "refusing to overwrite existing path");
            Err(ProvisionError::AlreadyProvisioned {
                path: path.to_path_buf(),
                within_msp,
            })
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ProvisionError::io(path, e)),
    }
}

/// Check every path in order, failing on the first one that exists
pub fn ensure_all_absent<P: AsRef<Path>>(paths: &[P]) -> Result<()> {
    for path in paths {
        ensure_absent(path.as_ref())?;
    }
    Ok(())
}

/// Create a single directory; the parent must already exist
pub fn create_directory(path: &Path) -> Result<()> {
    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }

    builder
        .create(path)
        .map_err(|e| ProvisionError::io(path, e))?;

    debug!(path = %path.display(), "created directory");
    Ok(())
}

/// Write a new file; fails if the file already exists
pub fn write_artifact(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options.open(path).map_err(|e| ProvisionError::io(path, e))?;
    file.write_all(contents)
        .map_err(|e| ProvisionError::io(path, e))?;
    file.sync_all().map_err(|e| ProvisionError::io(path, e))?;

    debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}

/// Read a whole artifact; the caller decides how a failure is reported
pub fn read_artifact(path: &Path) -> std::io::Result<Vec<u8>> {
    fs::read(path)
}
