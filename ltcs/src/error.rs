//! Error type for file handling, configuration and computation

use std::path::PathBuf;

use ltcs_core::LtcsError;

/// Errors raised while reading inputs, computing LTCS or writing reports
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file could not be opened, mapped, read or written
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of an input file could not be parsed
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// An input file is well-formed line by line but inconsistent as a whole
    #[error("{}: {message}", path.display())]
    Format { path: PathBuf, message: String },

    /// Failure in the core encoding or set algebra
    #[error("{0}")]
    Core(LtcsError),

    /// The worker pool could not be started
    #[error("failed to start worker pool: {0}")]
    ThreadPool(String),

    /// Invalid run configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// JSON summary serialization failed
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Format {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Process exit code for this error
    ///
    /// `1` for arguments and configuration, `3` for files, `4` when memory
    /// ran out and `5` when an encoded mode breaks the sign invariant.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::ThreadPool(_) => 1,
            Error::Core(LtcsError::AllocationFailure) => 4,
            Error::Core(LtcsError::InvariantViolation { .. }) => 5,
            _ => 3,
        }
    }
}

impl From<LtcsError> for Error {
    fn from(error: LtcsError) -> Self {
        Error::Core(error)
    }
}

/// Result type for the `ltcs` crate
pub type Result<T> = std::result::Result<T, Error>;
