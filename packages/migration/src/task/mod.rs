//! Migration Tasks
//!
//! A task decides which files it handles and rewrites their working copies.
//! The rewrite is split into a pure `transform` step and a commit step so
//! the driver can run transforms in parallel while commits stay ordered.

pub mod json_to_js_module;

use std::path::{Path, PathBuf};

use crate::context::MigrationContext;
use crate::error::{MigrationError, Result};

pub use json_to_js_module::JsonToJsModule;

/// Result of a task's transform for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutput {
    pub source: String,
    /// New location relative to the source root, if the file moves.
    pub relative_target_path: Option<PathBuf>,
}

pub trait MigrationTask: Send + Sync {
    fn name(&self) -> &str;

    /// Cheap pre-check on the path alone, before the file is read.
    fn accepts_path(&self, _file: &Path) -> bool {
        true
    }

    fn accepts_source(&self, file: &Path, source: &str) -> bool;

    /// Computes the new content of `file`. Must not modify the context.
    fn transform(&self, file: &Path, source: &str, context: &MigrationContext)
        -> Result<TaskOutput>;

    fn accept(&self, file: &Path, context: &mut MigrationContext) -> Result<bool> {
        if !self.accepts_path(file) {
            return Ok(false);
        }
        let working_copy = context.ensure_working_copy(file)?;
        Ok(self.accepts_source(file, working_copy.source()))
    }

    fn process(&self, file: &Path, context: &mut MigrationContext) -> Result<()> {
        let source = context.ensure_working_copy(file)?.source().to_string();
        let output = self.transform(file, &source, context)?;
        commit_output(file, output, context)
    }
}

/// Stores `output` in the working copy of `file`.
///
/// Fails without touching the working copy if the target already exists in
/// the source folder or is claimed by another file of this run.
pub fn commit_output(file: &Path, output: TaskOutput, context: &mut MigrationContext) -> Result<()> {
    if let Some(target) = output.relative_target_path.as_deref() {
        let destination = context.source_root().join(target);
        if context.file_system().exists(&destination)
            || context.claimed_target(target, file).is_some()
        {
            return Err(MigrationError::TargetExists {
                file: file.to_path_buf(),
                target: target.to_path_buf(),
            });
        }
    }

    let working_copy = context.ensure_working_copy(file)?;
    working_copy.set_source(output.source);
    if let Some(target) = output.relative_target_path {
        working_copy.set_relative_target_path(target);
    }
    Ok(())
}
