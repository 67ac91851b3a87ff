//! Persistence
//!
//! Writes dirty working copies back through the file system. A working copy
//! with a relative target path is written there and its original file is
//! removed; otherwise it is written in place.

use std::path::{Path, PathBuf};

use crate::context::MigrationContext;
use crate::error::MigrationError;
use crate::file_system::display_path;
use crate::working_copy::WorkingCopy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Whether the original file was (or in a dry run, would be) removed.
    pub moved: bool,
}

/// Outcome of [`commit`]. A file is either committed or failed, never both.
#[derive(Debug, Default)]
pub struct CommitReport {
    pub committed: Vec<CommittedFile>,
    pub failures: Vec<(PathBuf, MigrationError)>,
}

impl CommitReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Writes every dirty working copy. A failing file is recorded and the
/// remaining ones are still written.
pub fn commit(context: &MigrationContext, dry_run: bool) -> CommitReport {
    let logger = context.logger();
    let mut report = CommitReport::default();

    for working_copy in context.working_copies().filter(|wc| wc.is_dirty()) {
        let destination = match working_copy.relative_target_path() {
            Some(relative) => context.source_root().join(relative),
            None => working_copy.path().to_path_buf(),
        };
        let moved = destination != working_copy.path();

        if dry_run {
            logger.info(&format!(
                "dry run: would write '{}'",
                display_path(&destination)
            ));
        } else {
            match write_working_copy(context, working_copy, &destination, moved) {
                Ok(()) => logger.debug(&format!("wrote '{}'", display_path(&destination))),
                Err(e) => {
                    logger.error(&e.to_string());
                    report.failures.push((working_copy.path().to_path_buf(), e));
                    continue;
                }
            }
        }

        report.committed.push(CommittedFile {
            source: working_copy.path().to_path_buf(),
            destination,
            moved,
        });
    }

    report
}

/// Writes `destination` and removes the original when moved. If the
/// original cannot be removed the freshly written destination is removed
/// again, so the file is left as it was before the commit.
fn write_working_copy(
    context: &MigrationContext,
    working_copy: &WorkingCopy,
    destination: &Path,
    moved: bool,
) -> Result<(), MigrationError> {
    let fs = context.file_system();
    fs.write_file(destination, working_copy.source())
        .map_err(|e| MigrationError::io(destination, e))?;
    if moved {
        if let Err(e) = fs.remove_file(working_copy.path()) {
            if let Err(undo) = fs.remove_file(destination) {
                context.logger().warn(&format!(
                    "could not remove '{}' again: {}",
                    display_path(destination),
                    undo
                ));
            }
            return Err(MigrationError::io(working_copy.path(), e));
        }
    }
    Ok(())
}
