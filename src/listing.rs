//! Directory enumeration and ordering.

use crate::fs::FileSystem;
use crate::models::{FileInfo, SortMode};
use crate::size::calculate_dir_size;
use std::cmp::Ordering;
use std::path::Path;

/// Snapshots the immediate children of `dir`.
///
/// All-or-nothing: if the directory or any child cannot be read, the partial
/// listing is discarded and the error returned. When `size_directories` is
/// set, child directories get a best-effort `dir_total_size`.
pub fn enumerate(
    fs: &dyn FileSystem,
    dir: &Path,
    size_directories: bool,
) -> crate::Result<Vec<FileInfo>> {
    let children = fs.list_dir(dir)?;
    let mut files = Vec::with_capacity(children.len());

    for child in children {
        let mut info = snapshot(fs, &child)?;
        if info.is_dir() && size_directories {
            let total = match calculate_dir_size(fs, &child) {
                Ok(total) => Some(total),
                Err(err) => {
                    tracing::warn!("unable to size {}: {}", child.display(), err);
                    None
                }
            };
            info = info.with_dir_total_size(total);
        }
        files.push(info);
    }

    Ok(files)
}

/// Takes a [`FileInfo`] snapshot of `path`, following symlinks.
///
/// A dangling symlink is described by the link itself and reports
/// [`crate::models::FileType::Unknown`].
pub fn snapshot(fs: &dyn FileSystem, path: &Path) -> crate::Result<FileInfo> {
    let metadata = match fs.metadata(path) {
        Ok(metadata) => metadata,
        Err(err) => match fs.symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(_) => return Err(err),
        },
    };
    Ok(FileInfo::from_metadata(path, &metadata))
}

/// Orders a listing in place. Every mode is total: ties fall back to name.
pub fn sort_files(files: &mut [FileInfo], mode: SortMode) {
    match mode {
        SortMode::Default => files.sort_by(|a, b| a.name.cmp(&b.name)),
        SortMode::BySize => files.sort_by(|a, b| {
            b.effective_size()
                .cmp(&a.effective_size())
                .then_with(|| a.name.cmp(&b.name))
        }),
        SortMode::ByTime => {
            files.sort_by(|a, b| newest_first(a, b).then_with(|| a.name.cmp(&b.name)))
        }
    }
}

// Entries without a timestamp sort as the oldest.
fn newest_first(a: &FileInfo, b: &FileInfo) -> Ordering {
    match (a.modify_time, b.modify_time) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
