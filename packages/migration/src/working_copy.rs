//! Working Copy
//!
//! In-memory representation of one source file while a migration runs.
//! Tasks mutate the working copy only; writing it back is done by
//! [`crate::persistence`].

use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct WorkingCopy {
    path: PathBuf,
    original_source: String,
    source: String,
    relative_target_path: Option<PathBuf>,
}

impl WorkingCopy {
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            path: path.into(),
            original_source: source.clone(),
            source,
            relative_target_path: None,
        }
    }

    /// Absolute path of the file this working copy was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn original_source(&self) -> &str {
        &self.original_source
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    /// Target path relative to the source root, if the file is to be moved.
    pub fn relative_target_path(&self) -> Option<&Path> {
        self.relative_target_path.as_deref()
    }

    pub fn set_relative_target_path(&mut self, path: impl Into<PathBuf>) {
        self.relative_target_path = Some(path.into());
    }

    pub fn is_dirty(&self) -> bool {
        self.source != self.original_source || self.relative_target_path.is_some()
    }
}
