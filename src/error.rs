//! Error taxonomy shared by both subcommands.

use std::io;
use std::path::PathBuf;

/// Failures that abort a whole run.
///
/// Individual log deletions that fail are not errors; they are recorded as
/// outcomes in the cleanup report and the run carries on.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The cleanup target does not exist.
    #[error("Folder: '{}' doesn't exist", .0.display())]
    MissingDirectory(PathBuf),

    /// A source file could not be read while counting lines.
    #[error("Failed to read {}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Embedded defaults or a command-line value could not be interpreted.
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// Any other filesystem failure.
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ToolError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error class.
    ///
    /// Code 2 is left to clap for usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { .. } => 1,
            Self::MissingDirectory(_) => 3,
            Self::SourceRead { .. } => 4,
            Self::Settings(_) => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;
