//! Create, remove, copy and move.
//!
//! Every function takes already-resolved paths. File-level operations leave
//! the filesystem untouched on failure; tree operations clean up what they
//! created on a best-effort basis, since a half-finished recursive copy cannot
//! be rolled back without a journal.

use crate::errors::{CoreError, StatusCode};
use crate::fs::{is_empty_dir, FileSystem};
use std::io;
use std::path::{Path, PathBuf};

/// Creates an empty file, creating missing parent directories first.
pub fn create_file(fs: &dyn FileSystem, path: &Path) -> crate::Result<()> {
    if fs.exists(path) {
        return Err(CoreError::already_exists(path));
    }
    if let Some(parent) = path.parent() {
        fs.create_dir_all(parent)
            .map_err(|err| creation_failed(fs, path, err))?;
    }
    fs.create_new_file(path)
        .map_err(|err| creation_failed(fs, path, err))?;
    tracing::debug!("created file {}", path.display());
    Ok(())
}

/// Creates a directory along with any missing ancestors.
pub fn create_directory(fs: &dyn FileSystem, path: &Path) -> crate::Result<()> {
    if fs.exists(path) {
        return Err(CoreError::already_exists(path));
    }
    fs.create_dir_all(path)
        .map_err(|err| creation_failed(fs, path, err))?;
    tracing::debug!("created directory {}", path.display());
    Ok(())
}

// Creation only reports PathAlreadyExists for the target itself; any other
// failure, including a file sitting where an ancestor should be, is a denial.
fn creation_failed(fs: &dyn FileSystem, path: &Path, err: CoreError) -> CoreError {
    match err.code() {
        StatusCode::PermissionDenied => err,
        StatusCode::PathAlreadyExists if fs.exists(path) => CoreError::already_exists(path),
        _ => CoreError::PermissionDenied(err.detail().to_string()),
    }
}

/// Removes a file or symlink outright, or a directory with everything in it.
pub fn remove_path(fs: &dyn FileSystem, path: &Path) -> crate::Result<()> {
    let metadata = fs.symlink_metadata(path)?;
    if metadata.is_dir() {
        fs.remove_dir_all(path)?;
    } else {
        fs.remove_file(path)?;
    }
    tracing::debug!("removed {}", path.display());
    Ok(())
}

/// Removes a directory only if it has no children.
pub fn remove_empty_dir(fs: &dyn FileSystem, path: &Path) -> crate::Result<()> {
    let metadata = fs.symlink_metadata(path)?;
    if !metadata.is_dir() {
        return Err(CoreError::not_a_directory(path));
    }
    if !is_empty_dir(fs, path)? {
        return Err(CoreError::not_empty(path));
    }
    fs.remove_dir(path)?;
    tracing::debug!("removed empty directory {}", path.display());
    Ok(())
}

/// Copies `src` to `dst`, recursing into directories.
///
/// When `dst` is an existing directory the copy lands inside it under the
/// source's own name. An existing final target is never overwritten.
pub fn copy_item(fs: &dyn FileSystem, src: &Path, dst: &Path) -> crate::Result<PathBuf> {
    let is_dir = source_is_dir(fs, src, CoreError::CopyFailed)?;
    let target = final_target(fs, src, dst);

    if fs.exists(&target) {
        return Err(CoreError::copy_failed(&target, "destination already exists"));
    }
    if is_dir && target.starts_with(src) {
        return Err(CoreError::copy_failed(&target, "cannot copy a directory into itself"));
    }

    copy_entry(fs, src, &target).map_err(|err| CoreError::copy_failed(src, err))?;
    tracing::debug!("copied {} to {}", src.display(), target.display());
    Ok(target)
}

/// Moves or renames `src` to `dst`.
///
/// A rename is attempted first; across volumes the item is copied and the
/// source removed afterwards. Destination rules match [`copy_item`].
pub fn move_item(fs: &dyn FileSystem, src: &Path, dst: &Path) -> crate::Result<PathBuf> {
    let is_dir = source_is_dir(fs, src, CoreError::MoveFailed)?;
    let target = final_target(fs, src, dst);

    if fs.exists(&target) {
        return Err(CoreError::move_failed(&target, "destination already exists"));
    }
    if is_dir && target.starts_with(src) {
        return Err(CoreError::move_failed(&target, "cannot move a directory into itself"));
    }

    match fs.rename(src, &target) {
        Ok(()) => {}
        Err(err) if is_cross_device(&err) => {
            tracing::debug!("{} is on another volume, copying instead", target.display());
            copy_entry(fs, src, &target).map_err(|err| CoreError::move_failed(src, err))?;
            remove_path(fs, src).map_err(|err| {
                let reason = format!("copied but source could not be removed: {err}");
                CoreError::move_failed(src, reason)
            })?;
        }
        Err(err) => return Err(CoreError::move_failed(src, err)),
    }

    tracing::debug!("moved {} to {}", src.display(), target.display());
    Ok(target)
}

fn source_is_dir(
    fs: &dyn FileSystem,
    src: &Path,
    failed: fn(String) -> CoreError,
) -> crate::Result<bool> {
    match fs.symlink_metadata(src) {
        Ok(metadata) => Ok(metadata.is_dir()),
        Err(err) if err.code() == StatusCode::PathNotFound => Err(CoreError::not_found(src)),
        Err(err) => Err(failed(err.to_string())),
    }
}

fn final_target(fs: &dyn FileSystem, src: &Path, dst: &Path) -> PathBuf {
    let dst_is_dir = fs.metadata(dst).map(|m| m.is_dir()).unwrap_or(false);
    match src.file_name() {
        Some(name) if dst_is_dir => dst.join(name),
        _ => dst.to_path_buf(),
    }
}

#[cfg(unix)]
fn is_cross_device(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::EXDEV)
}

#[cfg(not(unix))]
fn is_cross_device(_err: &io::Error) -> bool {
    false
}

/// Copies one entry to a target that does not exist yet, removing whatever
/// was created if the copy fails part-way.
fn copy_entry(fs: &dyn FileSystem, src: &Path, target: &Path) -> crate::Result<()> {
    let result = copy_recursive(fs, src, target);
    if result.is_err() && fs.exists(target) {
        let cleanup = match fs.symlink_metadata(target) {
            Ok(metadata) if metadata.is_dir() => fs.remove_dir_all(target),
            _ => fs.remove_file(target),
        };
        if let Err(err) = cleanup {
            tracing::warn!("unable to clean up partial copy {}: {}", target.display(), err);
        }
    }
    result
}

fn copy_recursive(fs: &dyn FileSystem, src: &Path, target: &Path) -> crate::Result<()> {
    let metadata = fs.symlink_metadata(src)?;
    let file_type = metadata.file_type();

    if file_type.is_symlink() {
        fs.copy_symlink(src, target)
            .map_err(|err| CoreError::from_io(target, &err))?;
    } else if file_type.is_dir() {
        fs.create_dir(target)?;
        for child in fs.list_dir(src)? {
            if let Some(name) = child.file_name() {
                copy_recursive(fs, &child, &target.join(name))?;
            }
        }
    } else {
        fs.copy_file(src, target)
            .map_err(|err| CoreError::from_io(target, &err))?;
    }
    Ok(())
}
