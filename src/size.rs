//! Recursive directory totals.

use crate::errors::CoreError;
use crate::fs::FileSystem;
use std::path::Path;
use walkdir::WalkDir;

/// Sums the byte length of every regular file below `path`.
///
/// The root must exist, be a directory and be readable. Below the root the
/// walk is best-effort: an unreadable entry is logged and contributes 0.
/// Symlinks are never followed and never counted.
pub fn calculate_dir_size(fs: &dyn FileSystem, path: &Path) -> crate::Result<u64> {
    let metadata = fs.metadata(path)?;
    if !metadata.is_dir() {
        return Err(CoreError::not_a_directory(path));
    }
    // Surfaces PermissionDenied for an unreadable root instead of a silent 0.
    fs.open_dir(path)?;

    let mut total = 0u64;
    for entry in WalkDir::new(path).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("skipping entry while sizing {}: {}", path.display(), err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.metadata() {
            Ok(metadata) => total = total.saturating_add(metadata.len()),
            Err(err) => {
                tracing::warn!("skipping {}: {}", entry.path().display(), err);
            }
        }
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StatusCode;
    use crate::fs::RealFileSystem;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn sums_nested_regular_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.bin"), vec![0u8; 100]).unwrap();
        fs::create_dir_all(tmp.path().join("deep/er")).unwrap();
        fs::write(tmp.path().join("deep/er/b.bin"), vec![0u8; 200]).unwrap();
        fs::create_dir(tmp.path().join("empty")).unwrap();

        assert_eq!(calculate_dir_size(&RealFileSystem, tmp.path()).unwrap(), 300);
    }

    #[test]
    fn empty_directory_is_zero() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(calculate_dir_size(&RealFileSystem, tmp.path()).unwrap(), 0);
    }

    #[test]
    fn missing_root_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = calculate_dir_size(&RealFileSystem, &tmp.path().join("nope")).unwrap_err();
        assert_eq!(err.code(), StatusCode::PathNotFound);
    }

    #[test]
    fn file_root_is_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f.txt");
        fs::write(&file, "x").unwrap();

        let err = calculate_dir_size(&RealFileSystem, &file).unwrap_err();
        assert_eq!(err.code(), StatusCode::NotADirectory);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_counted() {
        let tmp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("big.bin"), vec![0u8; 4096]).unwrap();
        fs::write(tmp.path().join("small.bin"), vec![0u8; 10]).unwrap();
        std::os::unix::fs::symlink(outside.path(), tmp.path().join("link-dir")).unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("big.bin"),
            tmp.path().join("link-file"),
        )
        .unwrap();

        assert_eq!(calculate_dir_size(&RealFileSystem, tmp.path()).unwrap(), 10);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        // root bypasses directory permissions
        if unsafe { libc::geteuid() } == 0 {
            return;
        }
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("seen.bin"), vec![0u8; 40]).unwrap();
        let locked = tmp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.bin"), vec![0u8; 500]).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let total = calculate_dir_size(&RealFileSystem, tmp.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(total.unwrap(), 40);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_root_is_denied() {
        use std::os::unix::fs::PermissionsExt;

        if unsafe { libc::geteuid() } == 0 {
            return;
        }
        let tmp = TempDir::new().unwrap();
        let locked = tmp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let err = calculate_dir_size(&RealFileSystem, &locked);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(err.unwrap_err().code(), StatusCode::PermissionDenied);
    }
}
