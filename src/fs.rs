use crate::errors::CoreError;
use std::fs::{self, Metadata, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem boundary for the engine's single-entry operations.
///
/// Recursive walks (sizing and search) go through `walkdir` against the real
/// filesystem; only their root checks pass through this trait.
///
/// Every method translates the underlying `io::Error` into a [`CoreError`]
/// through [`CoreError::from_io`], so callers only ever see the status taxonomy.
pub trait FileSystem: Send + Sync {
    /// Returns true when something (including a dangling symlink) sits at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Reads metadata, following symlinks.
    fn metadata(&self, path: &Path) -> crate::Result<Metadata>;

    /// Reads metadata of the entry itself.
    fn symlink_metadata(&self, path: &Path) -> crate::Result<Metadata>;

    /// Creates a single directory; the parent must already exist.
    fn create_dir(&self, path: &Path) -> crate::Result<()>;

    /// Creates a directory and all missing parent directories.
    fn create_dir_all(&self, path: &Path) -> crate::Result<()>;

    /// Creates a new empty file, failing if anything exists at `path`.
    fn create_new_file(&self, path: &Path) -> crate::Result<()>;

    /// Removes a file or symlink.
    fn remove_file(&self, path: &Path) -> crate::Result<()>;

    /// Removes an empty directory.
    fn remove_dir(&self, path: &Path) -> crate::Result<()>;

    /// Removes a directory and everything below it.
    fn remove_dir_all(&self, path: &Path) -> crate::Result<()>;

    /// Renames/moves a path. The raw error is returned so callers can detect
    /// cross-device moves.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Copies regular file contents.
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64>;

    /// Recreates the symlink at `from` as a new link at `to`.
    fn copy_symlink(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Lists directory children as concrete paths.
    fn list_dir(&self, path: &Path) -> crate::Result<Vec<PathBuf>>;

    /// Opens `path` as a directory without reading its entries.
    fn open_dir(&self, path: &Path) -> crate::Result<()>;
}

/// Default filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn metadata(&self, path: &Path) -> crate::Result<Metadata> {
        fs::metadata(path).map_err(|err| CoreError::from_io(path, &err))
    }

    fn symlink_metadata(&self, path: &Path) -> crate::Result<Metadata> {
        fs::symlink_metadata(path).map_err(|err| CoreError::from_io(path, &err))
    }

    fn create_dir(&self, path: &Path) -> crate::Result<()> {
        fs::create_dir(path).map_err(|err| CoreError::from_io(path, &err))
    }

    fn create_dir_all(&self, path: &Path) -> crate::Result<()> {
        fs::create_dir_all(path).map_err(|err| CoreError::from_io(path, &err))
    }

    fn create_new_file(&self, path: &Path) -> crate::Result<()> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(|_| ())
            .map_err(|err| CoreError::from_io(path, &err))
    }

    fn remove_file(&self, path: &Path) -> crate::Result<()> {
        fs::remove_file(path).map_err(|err| CoreError::from_io(path, &err))
    }

    fn remove_dir(&self, path: &Path) -> crate::Result<()> {
        fs::remove_dir(path).map_err(|err| CoreError::from_io(path, &err))
    }

    fn remove_dir_all(&self, path: &Path) -> crate::Result<()> {
        fs::remove_dir_all(path).map_err(|err| CoreError::from_io(path, &err))
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        fs::copy(from, to)
    }

    #[cfg(unix)]
    fn copy_symlink(&self, from: &Path, to: &Path) -> io::Result<()> {
        let target = fs::read_link(from)?;
        std::os::unix::fs::symlink(target, to)
    }

    #[cfg(not(unix))]
    fn copy_symlink(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }

    fn list_dir(&self, path: &Path) -> crate::Result<Vec<PathBuf>> {
        fs::read_dir(path)
            .map_err(|err| CoreError::from_io(path, &err))?
            .map(|entry| entry.map(|v| v.path()))
            .collect::<Result<Vec<PathBuf>, io::Error>>()
            .map_err(|err| CoreError::from_io(path, &err))
    }

    fn open_dir(&self, path: &Path) -> crate::Result<()> {
        fs::read_dir(path)
            .map(|_| ())
            .map_err(|err| CoreError::from_io(path, &err))
    }
}

/// Returns true when `path` is a directory with no children.
pub fn is_empty_dir(fs: &dyn FileSystem, path: &Path) -> crate::Result<bool> {
    Ok(fs.list_dir(path)?.is_empty())
}
