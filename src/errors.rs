use std::fmt;
use std::io;
use std::path::Path;

/// Closed set of outcomes every engine operation reports.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum StatusCode {
    Success,

    UnknownError,
    InvalidArguments,

    PathNotFound,
    PathAlreadyExists,
    NotADirectory,
    NotAFile,
    PermissionDenied,
    /// Directory still has children (rmdir).
    NotEmpty,

    CopyFailed,
    MoveFailed,
}

impl StatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::UnknownError => "unknown error",
            Self::InvalidArguments => "invalid arguments",
            Self::PathNotFound => "path not found",
            Self::PathAlreadyExists => "path already exists",
            Self::NotADirectory => "not a directory",
            Self::NotAFile => "not a file",
            Self::PermissionDenied => "permission denied",
            Self::NotEmpty => "directory not empty",
            Self::CopyFailed => "copy failed",
            Self::MoveFailed => "move failed",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error type returned by every engine operation.
///
/// Each variant corresponds to exactly one non-success [`StatusCode`] and
/// carries the message shown to the user verbatim.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum CoreError {
    #[error("{0}")]
    Unknown(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("path not found: {0}")]
    PathNotFound(String),

    #[error("path already exists: {0}")]
    PathAlreadyExists(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("not a file: {0}")]
    NotAFile(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("directory not empty: {0}")]
    NotEmpty(String),

    #[error("copy failed: {0}")]
    CopyFailed(String),

    #[error("move failed: {0}")]
    MoveFailed(String),
}

impl CoreError {
    pub fn code(&self) -> StatusCode {
        match self {
            Self::Unknown(_) => StatusCode::UnknownError,
            Self::InvalidArguments(_) => StatusCode::InvalidArguments,
            Self::PathNotFound(_) => StatusCode::PathNotFound,
            Self::PathAlreadyExists(_) => StatusCode::PathAlreadyExists,
            Self::NotADirectory(_) => StatusCode::NotADirectory,
            Self::NotAFile(_) => StatusCode::NotAFile,
            Self::PermissionDenied(_) => StatusCode::PermissionDenied,
            Self::NotEmpty(_) => StatusCode::NotEmpty,
            Self::CopyFailed(_) => StatusCode::CopyFailed,
            Self::MoveFailed(_) => StatusCode::MoveFailed,
        }
    }

    /// The message without the code prefix.
    pub fn detail(&self) -> &str {
        match self {
            Self::Unknown(detail)
            | Self::InvalidArguments(detail)
            | Self::PathNotFound(detail)
            | Self::PathAlreadyExists(detail)
            | Self::NotADirectory(detail)
            | Self::NotAFile(detail)
            | Self::PermissionDenied(detail)
            | Self::NotEmpty(detail)
            | Self::CopyFailed(detail)
            | Self::MoveFailed(detail) => detail,
        }
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }

    pub fn not_found(path: &Path) -> Self {
        Self::PathNotFound(path.display().to_string())
    }

    pub fn already_exists(path: &Path) -> Self {
        Self::PathAlreadyExists(path.display().to_string())
    }

    pub fn not_a_directory(path: &Path) -> Self {
        Self::NotADirectory(path.display().to_string())
    }

    pub fn not_empty(path: &Path) -> Self {
        Self::NotEmpty(path.display().to_string())
    }

    pub fn copy_failed(path: &Path, reason: impl fmt::Display) -> Self {
        Self::CopyFailed(format!("{}: {reason}", path.display()))
    }

    pub fn move_failed(path: &Path, reason: impl fmt::Display) -> Self {
        Self::MoveFailed(format!("{}: {reason}", path.display()))
    }

    /// Translates an OS error raised while touching `path`.
    pub fn from_io(path: &Path, error: &io::Error) -> Self {
        let detail = format!("{} ({error})", path.display());
        match error.kind() {
            io::ErrorKind::NotFound => return Self::PathNotFound(detail),
            io::ErrorKind::PermissionDenied => return Self::PermissionDenied(detail),
            io::ErrorKind::AlreadyExists => return Self::PathAlreadyExists(detail),
            _ => {}
        }

        #[cfg(unix)]
        match error.raw_os_error() {
            Some(libc::ENOTDIR) => return Self::NotADirectory(detail),
            Some(libc::ENOTEMPTY) => return Self::NotEmpty(detail),
            Some(libc::EACCES) | Some(libc::EPERM) => return Self::PermissionDenied(detail),
            _ => {}
        }

        Self::Unknown(detail)
    }
}

/// Shared result alias for the engine.
pub type Result<T> = std::result::Result<T, CoreError>;

/// The `{code, message}` envelope handed to the presentation layer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Status {
    pub code: StatusCode,
    pub message: String,
}

impl Status {
    pub fn success() -> Self {
        Self {
            code: StatusCode::Success,
            message: String::new(),
        }
    }

    pub fn error(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn ok(&self) -> bool {
        self.code == StatusCode::Success
    }

    pub fn from_result<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Self::success(),
            Err(err) => Self::from(err),
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::success()
    }
}

impl From<&CoreError> for Status {
    fn from(err: &CoreError) -> Self {
        Self::error(err.code(), err.to_string())
    }
}

impl From<CoreError> for Status {
    fn from(err: CoreError) -> Self {
        Self::from(&err)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ok() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}", self.message)
        }
    }
}
