//! Migration Context
//!
//! Shared state of one migration run: the source root, the file system,
//! the loaded working copies and the const placeholder mappers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{MigrationError, Result};
use crate::file_system::FileSystem;
use crate::logging::{Logger, NullLogger};
use crate::placeholder::mapper::ConstMapperRegistry;
use crate::working_copy::WorkingCopy;

pub struct MigrationContext {
    source_root: PathBuf,
    fs: Arc<dyn FileSystem>,
    const_mappers: Arc<ConstMapperRegistry>,
    logger: Arc<dyn Logger>,
    working_copies: IndexMap<PathBuf, WorkingCopy>,
}

impl MigrationContext {
    pub fn new(
        source_root: impl Into<PathBuf>,
        fs: Arc<dyn FileSystem>,
        const_mappers: Arc<ConstMapperRegistry>,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            fs,
            const_mappers,
            logger: Arc::new(NullLogger::new()),
            working_copies: IndexMap::new(),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn file_system(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub fn const_mappers(&self) -> &ConstMapperRegistry {
        &self.const_mappers
    }

    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Returns the working copy of `file`, reading it on first access.
    pub fn ensure_working_copy(&mut self, file: &Path) -> Result<&mut WorkingCopy> {
        if !self.working_copies.contains_key(file) {
            let source = self
                .fs
                .read_file(file)
                .map_err(|e| MigrationError::io(file, e))?;
            self.working_copies
                .insert(file.to_path_buf(), WorkingCopy::new(file, source));
        }
        self.working_copies
            .get_mut(file)
            .ok_or_else(|| MigrationError::io(file, std::io::ErrorKind::NotFound.into()))
    }

    pub fn working_copy(&self, file: &Path) -> Option<&WorkingCopy> {
        self.working_copies.get(file)
    }

    /// Working copies in load order.
    pub fn working_copies(&self) -> impl Iterator<Item = &WorkingCopy> {
        self.working_copies.values()
    }

    /// `file` relative to the source root.
    pub fn relativize(&self, file: &Path) -> Result<PathBuf> {
        file.strip_prefix(&self.source_root)
            .map(Path::to_path_buf)
            .map_err(|_| MigrationError::OutsideSourceRoot {
                file: file.to_path_buf(),
                root: self.source_root.clone(),
            })
    }

    /// The file of another working copy that already targets `relative_target`.
    pub fn claimed_target(&self, relative_target: &Path, file: &Path) -> Option<&Path> {
        self.working_copies
            .values()
            .filter(|wc| wc.path() != file)
            .find(|wc| wc.relative_target_path() == Some(relative_target))
            .map(WorkingCopy::path)
    }
}
