//! Migration Errors
//!
//! Every variant aborts the migration of the file it names. Nothing is
//! committed for that file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MigrationError>;

#[derive(Debug, Error)]
pub enum MigrationError {
    /// A placeholder whose payload (or attribute name) is blank.
    #[error("Empty {kind} placeholder for attribute '{key}' in json model '{}'.", .file.display())]
    EmptyPlaceholder {
        kind: String,
        key: String,
        file: PathBuf,
    },

    #[error("unknown json placeholder: '{kind}' in file '{}'.", .file.display())]
    UnknownPlaceholder { kind: String, file: PathBuf },

    #[error(
        "The migration of file '{}' would be stored in '{}' but this file already exists in the source folder!",
        .file.display(),
        .target.display()
    )]
    TargetExists { file: PathBuf, target: PathBuf },

    #[error("File '{}' is not located below the source root '{}'.", .file.display(), .root.display())]
    OutsideSourceRoot { file: PathBuf, root: PathBuf },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MigrationError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MigrationError::Io {
            path: path.into(),
            source,
        }
    }

    /// The file the error is reported against.
    pub fn file(&self) -> &PathBuf {
        match self {
            MigrationError::EmptyPlaceholder { file, .. }
            | MigrationError::UnknownPlaceholder { file, .. }
            | MigrationError::TargetExists { file, .. }
            | MigrationError::OutsideSourceRoot { file, .. } => file,
            MigrationError::Io { path, .. } => path,
        }
    }
}
