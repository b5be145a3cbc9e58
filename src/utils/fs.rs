use crate::error::{Result, UpmError};
use crate::ui;
use std::fs::Permissions;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Read a file, returning `None` when it does not exist.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(UpmError::IoError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| UpmError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Fail unless the specfile is present. Used before any removal.
pub fn require_file(path: &Path) -> Result<()> {
    if !file_exists(path) {
        return Err(UpmError::SpecfileMissing {
            file: path.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

/// Replace `path` with `contents` via a temporary file in the same directory,
/// so readers only ever see the old or the new file.
///
/// The replacement keeps the mode of the file it replaces. A new file gets
/// `0644` instead of the temp file's owner-only mode.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    ui::progress(&format!("write {}", file_name));

    let io_err = |e: std::io::Error| UpmError::IoError {
        path: path.to_path_buf(),
        source: e,
    };

    let permissions = match std::fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => new_file_permissions(),
        Err(e) => return Err(io_err(e)),
    };

    let mut tmp = NamedTempFile::with_prefix_in(format!(".{}", file_name), dir).map_err(io_err)?;
    tmp.write_all(contents).map_err(io_err)?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions).map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    Ok(())
}
