use chrono::{DateTime, Local};
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Kind of filesystem entry a [`FileInfo`] describes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FileType {
    File,
    Directory,
    Unknown,
}

impl FileType {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        if metadata.is_dir() {
            Self::Directory
        } else if metadata.is_file() {
            Self::File
        } else {
            Self::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Directory => "Directory",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordering applied to a directory listing.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum SortMode {
    /// Name ascending.
    #[default]
    Default,
    /// Largest first, directories ranked by their recursive total.
    BySize,
    /// Newest modification first.
    ByTime,
}

/// Snapshot of one filesystem entry, taken at query time.
#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo {
    pub name: String,
    pub path: PathBuf,
    pub file_type: FileType,
    /// Byte length for files, 0 for directories.
    pub size: u64,
    /// Recursive total, only present when directory sizing was requested.
    pub dir_total_size: Option<u64>,
    pub modify_time: Option<DateTime<Local>>,
    pub create_time: Option<DateTime<Local>>,
    pub access_time: Option<DateTime<Local>>,
}

impl FileInfo {
    pub fn from_metadata(path: &Path, metadata: &Metadata) -> Self {
        let file_type = FileType::from_metadata(metadata);
        let size = match file_type {
            FileType::Directory => 0,
            _ => metadata.len(),
        };
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            name,
            path: path.to_path_buf(),
            file_type,
            size,
            dir_total_size: None,
            modify_time: local_time(metadata.modified()),
            create_time: local_time(metadata.created()),
            access_time: local_time(metadata.accessed()),
        }
    }

    pub fn with_dir_total_size(mut self, total: Option<u64>) -> Self {
        self.dir_total_size = total;
        self
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    /// Size used for ranking: the recursive total for directories, the byte
    /// length otherwise.
    pub fn effective_size(&self) -> u64 {
        match self.file_type {
            FileType::Directory => self.dir_total_size.unwrap_or(0),
            _ => self.size,
        }
    }
}

fn local_time(time: std::io::Result<SystemTime>) -> Option<DateTime<Local>> {
    time.ok().map(DateTime::<Local>::from)
}
