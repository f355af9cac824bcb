//! The file management engine: one working directory plus the operations
//! that read and mutate the filesystem relative to it.

use crate::config::ExplorerConfig;
use crate::errors::CoreError;
use crate::fs::{FileSystem, RealFileSystem};
use crate::listing::{enumerate, snapshot, sort_files};
use crate::models::{FileInfo, SortMode};
use crate::path::{normalize, PathResolver};
use crate::{ops, search, size};
use std::path::{Path, PathBuf};

/// Stateful engine serving a single interactive session.
///
/// The working directory always names an existing directory; only a
/// successful [`FileManager::change_directory`] replaces it. Every other
/// operation resolves its arguments against it and reports failure through
/// [`CoreError`], never by panicking.
pub struct FileManager {
    cwd: PathBuf,
    resolver: PathResolver,
    fs: Box<dyn FileSystem>,
    size_directories: bool,
}

impl std::fmt::Debug for FileManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileManager")
            .field("cwd", &self.cwd)
            .field("size_directories", &self.size_directories)
            .finish()
    }
}

impl FileManager {
    /// Starts in `initial_path`, or the process working directory when `None`.
    pub fn new(initial_path: Option<&str>) -> crate::Result<Self> {
        let mut config = ExplorerConfig::from_env();
        if let Some(path) = initial_path {
            config = config.with_start_dir(path);
        }
        Self::with_config(config)
    }

    pub fn with_config(config: ExplorerConfig) -> crate::Result<Self> {
        Self::with_filesystem(config, Box::new(RealFileSystem))
    }

    /// Fails if the starting directory cannot be determined or is not an
    /// existing directory.
    pub fn with_filesystem(config: ExplorerConfig, fs: Box<dyn FileSystem>) -> crate::Result<Self> {
        let resolver = PathResolver::new(config.home_dir.clone());
        let start = match &config.start_dir {
            Some(dir) => resolver.resolve_with(&dir.to_string_lossy(), process_cwd)?,
            None => normalize(&process_cwd()?),
        };
        ensure_directory(fs.as_ref(), &start)?;

        tracing::debug!("file manager starting in {}", start.display());
        Ok(Self {
            cwd: start,
            resolver,
            fs,
            size_directories: config.size_directories,
        })
    }

    pub fn current_path(&self) -> &Path {
        &self.cwd
    }

    /// Resolves a user argument against the working directory without
    /// touching the filesystem.
    pub fn resolve(&self, input: &str) -> crate::Result<PathBuf> {
        self.resolver.resolve(&self.cwd, input)
    }

    /// Empty input, like `cd` alone, goes home.
    pub fn change_directory(&mut self, target: &str) -> crate::Result<()> {
        let path = self.resolve(target)?;
        ensure_directory(self.fs.as_ref(), &path)?;
        tracing::debug!("working directory {} -> {}", self.cwd.display(), path.display());
        self.cwd = path;
        Ok(())
    }

    pub fn list_files(&self, sort_mode: SortMode) -> crate::Result<Vec<FileInfo>> {
        let mut files = enumerate(self.fs.as_ref(), &self.cwd, self.size_directories)?;
        sort_files(&mut files, sort_mode);
        Ok(files)
    }

    pub fn file_stat(&self, name: &str) -> crate::Result<FileInfo> {
        let path = self.resolve_named(name)?;
        snapshot(self.fs.as_ref(), &path)
    }

    pub fn calculate_dir_size(&self, path: &str) -> crate::Result<u64> {
        let path = self.resolve(path)?;
        size::calculate_dir_size(self.fs.as_ref(), &path)
    }

    pub fn create_file(&self, name: &str) -> crate::Result<PathBuf> {
        let path = self.resolve_named(name)?;
        ops::create_file(self.fs.as_ref(), &path)?;
        Ok(path)
    }

    pub fn create_directory(&self, name: &str) -> crate::Result<PathBuf> {
        let path = self.resolve_named(name)?;
        ops::create_directory(self.fs.as_ref(), &path)?;
        Ok(path)
    }

    /// Removes a file, or a directory together with its contents (`rm -r`).
    pub fn remove_path(&self, name: &str) -> crate::Result<()> {
        let path = self.resolve_named(name)?;
        self.guard_working_directory(&path)?;
        ops::remove_path(self.fs.as_ref(), &path)
    }

    /// Removes a directory only when it is empty (`rmdir`).
    pub fn remove_empty_directory(&self, name: &str) -> crate::Result<()> {
        let path = self.resolve_named(name)?;
        self.guard_working_directory(&path)?;
        ops::remove_empty_dir(self.fs.as_ref(), &path)
    }

    /// Returns the path the copy was written to.
    pub fn copy_item(&self, src: &str, dst: &str) -> crate::Result<PathBuf> {
        let src = self.resolve_named(src)?;
        let dst = self.resolve_named(dst)?;
        ops::copy_item(self.fs.as_ref(), &src, &dst)
    }

    /// Returns the path the item now lives at.
    pub fn move_item(&self, src: &str, dst: &str) -> crate::Result<PathBuf> {
        let src = self.resolve_named(src)?;
        let dst = self.resolve_named(dst)?;
        self.guard_working_directory(&src)?;
        ops::move_item(self.fs.as_ref(), &src, &dst)
    }

    /// Searches below the working directory.
    pub fn search(&self, keyword: &str) -> crate::Result<Vec<FileInfo>> {
        search::search(self.fs.as_ref(), &self.cwd, keyword)
    }

    pub fn search_in(&self, root: &str, keyword: &str) -> crate::Result<Vec<FileInfo>> {
        let root = self.resolve(root)?;
        search::search(self.fs.as_ref(), &root, keyword)
    }

    // Named arguments must be non-empty; an empty string would otherwise
    // resolve to the home directory.
    fn resolve_named(&self, name: &str) -> crate::Result<PathBuf> {
        if name.trim().is_empty() {
            return Err(CoreError::invalid_arguments("a path argument is required"));
        }
        self.resolve(name)
    }

    // Removing or moving the working directory (or an ancestor) would leave
    // the engine pointing at nothing.
    fn guard_working_directory(&self, path: &Path) -> crate::Result<()> {
        if self.cwd.starts_with(path) {
            return Err(CoreError::invalid_arguments(format!(
                "refusing to remove or move the working directory or its parent: {}",
                path.display()
            )));
        }
        Ok(())
    }
}

fn process_cwd() -> crate::Result<PathBuf> {
    std::env::current_dir().map_err(|err| CoreError::from_io(Path::new("."), &err))
}

fn ensure_directory(fs: &dyn FileSystem, path: &Path) -> crate::Result<()> {
    let metadata = fs.metadata(path)?;
    if !metadata.is_dir() {
        return Err(CoreError::not_a_directory(path));
    }
    Ok(())
}
