//! Turns user-supplied path strings into absolute, lexically normalized paths.

use crate::errors::CoreError;
use std::path::{Component, Path, PathBuf};

/// Resolves shell arguments against a working directory.
///
/// Resolution is purely lexical: the filesystem is never consulted, so
/// existence and type checks stay with the calling operation.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    home: Option<PathBuf>,
}

impl PathResolver {
    /// Uses `home` as the target of `~`, falling back to the user database.
    pub fn new(home: Option<PathBuf>) -> Self {
        Self { home }
    }

    pub fn home_dir(&self) -> crate::Result<PathBuf> {
        self.home
            .clone()
            .filter(|home| !home.as_os_str().is_empty())
            .or_else(dirs::home_dir)
            .map(|home| normalize(&home))
            .ok_or_else(|| {
                CoreError::PathNotFound("unable to determine home directory".to_string())
            })
    }

    pub fn resolve(&self, cwd: &Path, input: &str) -> crate::Result<PathBuf> {
        self.resolve_with(input, || Ok(cwd.to_path_buf()))
    }

    /// Like [`PathResolver::resolve`], but only asks for the working
    /// directory when `input` is relative.
    pub fn resolve_with<F>(&self, input: &str, cwd: F) -> crate::Result<PathBuf>
    where
        F: FnOnce() -> crate::Result<PathBuf>,
    {
        if input.is_empty() || input == "~" {
            return self.home_dir();
        }
        if let Some(rest) = input.strip_prefix("~/") {
            return Ok(normalize(&self.home_dir()?.join(rest)));
        }

        let path = Path::new(input);
        if path.is_absolute() {
            Ok(normalize(path))
        } else {
            Ok(normalize(&cwd()?.join(path)))
        }
    }
}

/// Eliminates `.` and `..` segments without touching the filesystem.
///
/// `..` at the root stays at the root; a relative path that climbs above its
/// start keeps the leading `..` segments.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
