//! Engine configuration, read from an explicit environment map.

use std::collections::HashMap;
use std::path::PathBuf;

/// Overrides the initial working directory.
pub const START_DIR_ENV: &str = "EXPLORER_START_DIR";

/// Disables recursive directory totals in listings when set to a false-like value.
pub const LIST_DIR_SIZES_ENV: &str = "EXPLORER_LIST_DIR_SIZES";

/// Filter directive for the shell's log subscriber.
pub const LOG_ENV: &str = "EXPLORER_LOG";

pub type EnvVarMap = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// Initial working directory; the process cwd is used when absent.
    pub start_dir: Option<PathBuf>,
    /// Target of `~`; resolved from the OS user database when absent.
    pub home_dir: Option<PathBuf>,
    /// Whether listings compute recursive totals for child directories.
    pub size_directories: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            start_dir: None,
            home_dir: None,
            size_directories: true,
        }
    }
}

impl ExplorerConfig {
    /// Builds a config from the process environment.
    pub fn from_env() -> Self {
        let environ = std::env::vars().collect::<EnvVarMap>();
        Self::from_environ(&environ)
    }

    pub fn from_environ(environ: &EnvVarMap) -> Self {
        let start_dir = environ
            .get(START_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let home_dir = environ
            .get("HOME")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let size_directories = environ
            .get(LIST_DIR_SIZES_ENV)
            .map(|value| !is_false_like(value))
            .unwrap_or(true);

        Self {
            start_dir,
            home_dir,
            size_directories,
        }
    }

    pub fn with_start_dir(mut self, start_dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(start_dir.into());
        self
    }

    pub fn with_home_dir(mut self, home_dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(home_dir.into());
        self
    }

    pub fn with_size_directories(mut self, enabled: bool) -> Self {
        self.size_directories = enabled;
        self
    }
}

fn is_false_like(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
