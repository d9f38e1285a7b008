use std::fmt;
use std::path::PathBuf;

/// Result type for letterbox-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types produced by the gateway, the exporter and configuration
#[derive(Debug)]
pub enum Error {
    /// No candidate location holds the executable
    ExecutableNotFound { name: String, searched: Vec<PathBuf> },

    /// The executable could not be started, or exited non-zero without an error envelope
    ProcessFailure {
        executable: PathBuf,
        status: String,
        output: String,
    },

    /// The executable reported `{"error": "..."}`
    RemoteError(String),

    /// Success output did not decode into the expected shape
    MalformedPayload {
        executable: String,
        source: serde_json::Error,
    },

    /// Export destination could not be turned into an absolute path
    InvalidPath { path: String, reason: String },

    /// Permission denied creating a directory or file
    PermissionDenied(PathBuf),

    /// Creating the export's parent directories failed
    DirectoryCreateFailed { dir: PathBuf, source: std::io::Error },

    /// Creating or truncating the export file failed
    FileCreateFailed { path: PathBuf, source: std::io::Error },

    /// Writing the CSV header or flushing the file failed
    WriteFailed { path: PathBuf, source: csv::Error },

    /// Quote file missing or unreadable
    Quotes(String),

    /// Configuration error
    Config(String),

    /// IO operation failed
    Io(std::io::Error),
}

impl Error {
    /// Short label used in log records.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::ExecutableNotFound { .. } => "executable_not_found",
            Error::ProcessFailure { .. } => "process_failure",
            Error::RemoteError(_) => "remote_error",
            Error::MalformedPayload { .. } => "malformed_payload",
            Error::InvalidPath { .. } => "invalid_path",
            Error::PermissionDenied(_) => "permission_denied",
            Error::DirectoryCreateFailed { .. } => "directory_create_failed",
            Error::FileCreateFailed { .. } => "file_create_failed",
            Error::WriteFailed { .. } => "write_failed",
            Error::Quotes(_) => "quotes",
            Error::Config(_) => "config",
            Error::Io(_) => "io",
        }
    }

    pub fn is_export_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidPath { .. }
                | Error::PermissionDenied(_)
                | Error::DirectoryCreateFailed { .. }
                | Error::FileCreateFailed { .. }
                | Error::WriteFailed { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ExecutableNotFound { name, searched } => {
                let paths: Vec<String> = searched.iter().map(|p| p.display().to_string()).collect();
                write!(f, "executable '{}' not found at any of: {}", name, paths.join(", "))
            }
            Error::ProcessFailure {
                executable,
                status,
                output,
            } => {
                write!(f, "failed to run '{}': {}", executable.display(), status)?;
                if !output.trim().is_empty() {
                    write!(f, ", output: {}", output.trim())?;
                }
                Ok(())
            }
            Error::RemoteError(msg) => write!(f, "{}", msg),
            Error::MalformedPayload { executable, source } => {
                write!(f, "failed to parse {} output: {}", executable, source)
            }
            Error::InvalidPath { path, reason } => {
                write!(f, "invalid path format '{}': {}", path, reason)
            }
            Error::PermissionDenied(path) => write!(f, "permission denied: {}", path.display()),
            Error::DirectoryCreateFailed { dir, source } => {
                write!(f, "failed to create directory {}: {}", dir.display(), source)
            }
            Error::FileCreateFailed { path, source } => {
                write!(f, "failed to create file {}: {}", path.display(), source)
            }
            Error::WriteFailed { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            Error::Quotes(msg) => write!(f, "quotes unavailable: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MalformedPayload { source, .. } => Some(source),
            Error::DirectoryCreateFailed { source, .. } => Some(source),
            Error::FileCreateFailed { source, .. } => Some(source),
            Error::WriteFailed { source, .. } => Some(source),
            Error::Io(err) => Some(err),
            Error::ExecutableNotFound { .. }
            | Error::ProcessFailure { .. }
            | Error::RemoteError(_)
            | Error::InvalidPath { .. }
            | Error::PermissionDenied(_)
            | Error::Quotes(_)
            | Error::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_every_location() {
        let err = Error::ExecutableNotFound {
            name: "get_diary".to_string(),
            searched: vec![PathBuf::from("/a/get_diary"), PathBuf::from("/b/get_diary")],
        };
        let msg = err.to_string();
        assert!(msg.contains("not found at any of"));
        assert!(msg.contains("/a/get_diary"));
        assert!(msg.contains("/b/get_diary"));
    }

    #[test]
    fn test_remote_error_is_verbatim() {
        let err = Error::RemoteError("No username provided".to_string());
        assert_eq!(err.to_string(), "No username provided");
        assert!(!err.is_export_error());
    }

    #[test]
    fn test_export_errors_classified() {
        assert!(Error::PermissionDenied(PathBuf::from("/root")).is_export_error());
        assert_eq!(Error::PermissionDenied(PathBuf::from("/x")).kind(), "permission_denied");
    }
}
