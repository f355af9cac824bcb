//! Recursive keyword search by entry name.

use crate::errors::CoreError;
use crate::fs::FileSystem;
use crate::listing::snapshot;
use crate::models::FileInfo;
use std::path::Path;
use walkdir::WalkDir;

/// Collects every entry below `root` whose base name contains `keyword`.
///
/// Matching is a case-sensitive substring test, so an empty keyword matches
/// everything. Results come back in pre-order with siblings visited by file
/// name, which keeps repeated searches over an unchanged tree identical.
/// Unreadable entries below the root are logged and skipped.
pub fn search(fs: &dyn FileSystem, root: &Path, keyword: &str) -> crate::Result<Vec<FileInfo>> {
    let metadata = fs.metadata(root)?;
    if !metadata.is_dir() {
        return Err(CoreError::not_a_directory(root));
    }
    fs.open_dir(root)?;

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut matches = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("skipping entry while searching {}: {}", root.display(), err);
                continue;
            }
        };
        if !entry.file_name().to_string_lossy().contains(keyword) {
            continue;
        }
        match snapshot(fs, entry.path()) {
            Ok(info) => matches.push(info),
            Err(err) => tracing::warn!("skipping {}: {}", entry.path().display(), err),
        }
    }

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StatusCode;
    use crate::fs::RealFileSystem;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("backup/old")).unwrap();
        fs::write(tmp.path().join("project.txt"), "p").unwrap();
        fs::write(tmp.path().join("readme.md"), "r").unwrap();
        fs::write(tmp.path().join("backup/project_backup.txt"), "b").unwrap();
        fs::write(tmp.path().join("backup/old/Project.txt"), "o").unwrap();
        tmp
    }

    fn relative(tmp: &TempDir, files: &[FileInfo]) -> Vec<PathBuf> {
        files
            .iter()
            .map(|f| f.path.strip_prefix(tmp.path()).unwrap().to_path_buf())
            .collect()
    }

    #[test]
    fn matches_substring_case_sensitively() {
        let tmp = fixture();
        let found = search(&RealFileSystem, tmp.path(), "project").unwrap();

        assert_eq!(
            relative(&tmp, &found),
            vec![
                PathBuf::from("backup/project_backup.txt"),
                PathBuf::from("project.txt"),
            ]
        );
    }

    #[test]
    fn empty_keyword_matches_everything_in_preorder() {
        let tmp = fixture();
        let found = search(&RealFileSystem, tmp.path(), "").unwrap();

        assert_eq!(
            relative(&tmp, &found),
            vec![
                PathBuf::from("backup"),
                PathBuf::from("backup/old"),
                PathBuf::from("backup/old/Project.txt"),
                PathBuf::from("backup/project_backup.txt"),
                PathBuf::from("project.txt"),
                PathBuf::from("readme.md"),
            ]
        );
    }

    #[test]
    fn directories_match_too() {
        let tmp = fixture();
        let found = search(&RealFileSystem, tmp.path(), "back").unwrap();

        assert_eq!(found[0].name, "backup");
        assert!(found[0].is_dir());
    }

    #[test]
    fn no_match_is_an_empty_success() {
        let tmp = fixture();
        assert!(search(&RealFileSystem, tmp.path(), "zzz").unwrap().is_empty());
    }

    #[test]
    fn root_must_be_an_existing_directory() {
        let tmp = fixture();
        let missing = search(&RealFileSystem, &tmp.path().join("nope"), "x").unwrap_err();
        let file = search(&RealFileSystem, &tmp.path().join("readme.md"), "x").unwrap_err();

        assert_eq!(missing.code(), StatusCode::PathNotFound);
        assert_eq!(file.code(), StatusCode::NotADirectory);
    }
}
