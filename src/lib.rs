//! File management engine behind the interactive explorer shell.
//!
//! A [`FileManager`] owns one working directory and resolves every argument
//! against it. Operations return [`Result`]; front ends that want the flat
//! `{code, message}` envelope convert with [`Status::from_result`].

pub mod config;
pub mod errors;
pub mod fs;
pub mod helpers;
pub mod listing;
pub mod manager;
pub mod models;
pub mod ops;
pub mod path;
pub mod search;
pub mod size;

pub use config::ExplorerConfig;
pub use errors::{CoreError, Result, Status, StatusCode};
pub use fs::{FileSystem, RealFileSystem};
pub use helpers::{format_file_time, print_size, sanitize_user_path, FILE_TIME_FORMAT};
pub use manager::FileManager;
pub use models::{FileInfo, FileType, SortMode};
pub use path::{normalize, PathResolver};

/// Re-export a small stable API surface for front ends.
pub mod prelude {
    pub use crate::{
        config::ExplorerConfig,
        errors::{CoreError, Result, Status, StatusCode},
        fs::{FileSystem, RealFileSystem},
        helpers::*,
        manager::FileManager,
        models::*,
    };
}
