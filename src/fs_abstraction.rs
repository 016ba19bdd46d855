//! Filesystem abstraction layer for testability
//!
//! The pipeline only ever reads whole files, checks for existence and replaces
//! the IP list in one step. This trait covers exactly that, so tests can run
//! the whole pipeline against a mock without touching disk.

use std::fs::Permissions;
use std::io::{self, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[cfg(test)]
use mockall::automock;

/// Trait abstracting filesystem operations for dependency injection.
#[cfg_attr(test, automock)]
pub trait FileSystem {
    /// Read file contents as raw bytes. Decoding is left to the caller.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replace the file at `path` with `contents` in a single rename.
    ///
    /// The previous file's permissions are kept (0644 for a new file) and a
    /// symlink at `path` is followed, so the link itself survives.
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Mode of a list file that did not exist before
const NEW_FILE_MODE: u32 = 0o644;

/// Follow a symlink at `path` to the file it points to.
/// Dangling links resolve to themselves and get replaced.
fn resolve_symlink(path: &Path) -> PathBuf {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

/// Real filesystem implementation using std::fs.
#[derive(Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let target = resolve_symlink(path);

        // Temp file must live on the same filesystem for rename to be atomic
        let parent_dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let permissions = std::fs::metadata(&target)
            .map(|m| m.permissions())
            .unwrap_or_else(|_| Permissions::from_mode(NEW_FILE_MODE));

        let mut temp_file = NamedTempFile::new_in(parent_dir)?;
        temp_file.write_all(contents)?;
        temp_file.as_file().set_permissions(permissions)?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Decode bytes as UTF-8, dropping every invalid sequence.
///
/// Unlike `String::from_utf8_lossy` nothing is substituted, so a stray byte
/// inside an address or a log marker leaves the surrounding text intact.
pub fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

static REAL_FS: RealFileSystem = RealFileSystem;

/// Get a reference to the global real filesystem instance.
pub fn real_fs() -> &'static RealFileSystem {
    &REAL_FS
}
