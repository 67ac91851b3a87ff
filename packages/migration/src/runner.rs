//! Migration Runner
//!
//! Applies a list of tasks to a list of files and reports the outcome per
//! file. A failing file never stops the run unless `fail_fast` is set.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::context::MigrationContext;
use crate::error::{MigrationError, Result};
use crate::file_system::display_path;
use crate::task::{commit_output, MigrationTask, TaskOutput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Stop at the first failing file.
    pub fail_fast: bool,
    /// Worker threads for transforms. `1` runs everything on the caller's thread.
    pub jobs: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            fail_fast: false,
            jobs: 1,
        }
    }
}

#[derive(Debug, Default)]
pub struct MigrationReport {
    pub migrated: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, MigrationError)>,
}

impl MigrationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} migrated, {} skipped, {} failed",
            self.migrated.len(),
            self.skipped.len(),
            self.failures.len()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Skipped,
    Migrated,
    Failed,
}

pub struct Migration {
    tasks: Vec<Box<dyn MigrationTask>>,
}

impl Migration {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn with_task(mut self, task: impl MigrationTask + 'static) -> Self {
        self.tasks.push(Box::new(task));
        self
    }

    pub fn run(
        &self,
        files: &[PathBuf],
        context: &mut MigrationContext,
        options: RunOptions,
    ) -> MigrationReport {
        let mut outcomes = vec![Outcome::Skipped; files.len()];
        let mut failures = Vec::new();

        if options.jobs > 1 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(options.jobs)
                .build()
            {
                Ok(pool) => {
                    self.run_parallel(&pool, files, context, options, &mut outcomes, &mut failures)
                }
                Err(e) => {
                    context.logger().warn(&format!(
                        "could not start {} workers ({}), migrating sequentially",
                        options.jobs, e
                    ));
                    self.run_sequential(files, context, options, &mut outcomes, &mut failures)
                }
            }
        } else {
            self.run_sequential(files, context, options, &mut outcomes, &mut failures);
        }

        let mut report = MigrationReport {
            failures,
            ..MigrationReport::default()
        };
        for (file, outcome) in files.iter().zip(outcomes) {
            match outcome {
                Outcome::Migrated => report.migrated.push(file.clone()),
                Outcome::Skipped => report.skipped.push(file.clone()),
                Outcome::Failed => {}
            }
        }
        context.logger().info(&report.summary());
        report
    }

    fn run_sequential(
        &self,
        files: &[PathBuf],
        context: &mut MigrationContext,
        options: RunOptions,
        outcomes: &mut [Outcome],
        failures: &mut Vec<(PathBuf, MigrationError)>,
    ) {
        for (index, file) in files.iter().enumerate() {
            for task in &self.tasks {
                match Self::run_task(task.as_ref(), file, context) {
                    Ok(true) => outcomes[index] = Outcome::Migrated,
                    Ok(false) => {}
                    Err(e) => {
                        Self::record_failure(context, file, e, failures);
                        outcomes[index] = Outcome::Failed;
                        break;
                    }
                }
            }
            if outcomes[index] == Outcome::Skipped {
                context
                    .logger()
                    .debug(&format!("skipped '{}'", display_path(file)));
            }
            if options.fail_fast && outcomes[index] == Outcome::Failed {
                break;
            }
        }
    }

    fn run_task(task: &dyn MigrationTask, file: &Path, context: &mut MigrationContext) -> Result<bool> {
        if !task.accept(file, context)? {
            return Ok(false);
        }
        task.process(file, context)?;
        Self::log_migrated(context, task, file);
        Ok(true)
    }

    /// Transforms run on the pool; loading and committing stay on the
    /// caller's thread, in input order, so target claims are consistent.
    fn run_parallel(
        &self,
        pool: &rayon::ThreadPool,
        files: &[PathBuf],
        context: &mut MigrationContext,
        options: RunOptions,
        outcomes: &mut [Outcome],
        failures: &mut Vec<(PathBuf, MigrationError)>,
    ) {
        for task in &self.tasks {
            let mut candidates: Vec<(usize, String)> = Vec::new();
            for (index, file) in files.iter().enumerate() {
                if outcomes[index] == Outcome::Failed || !task.accepts_path(file) {
                    continue;
                }
                match context.ensure_working_copy(file) {
                    Ok(working_copy) => candidates.push((index, working_copy.source().to_string())),
                    Err(e) => {
                        Self::record_failure(context, file, e, failures);
                        outcomes[index] = Outcome::Failed;
                        if options.fail_fast {
                            return;
                        }
                    }
                }
            }

            let shared: &MigrationContext = context;
            let task_ref: &dyn MigrationTask = task.as_ref();
            let transformed: Vec<(usize, Option<Result<TaskOutput>>)> = pool.install(|| {
                candidates
                    .par_iter()
                    .map(|(index, source)| {
                        let file = &files[*index];
                        let output = task_ref
                            .accepts_source(file, source)
                            .then(|| task_ref.transform(file, source, shared));
                        (*index, output)
                    })
                    .collect()
            });

            for (index, output) in transformed {
                let file = &files[index];
                let committed = match output {
                    None => continue,
                    Some(output) => output.and_then(|out| commit_output(file, out, context)),
                };
                match committed {
                    Ok(()) => {
                        Self::log_migrated(context, task_ref, file);
                        outcomes[index] = Outcome::Migrated;
                    }
                    Err(e) => {
                        Self::record_failure(context, file, e, failures);
                        outcomes[index] = Outcome::Failed;
                        if options.fail_fast {
                            return;
                        }
                    }
                }
            }
        }
    }

    fn log_migrated(context: &MigrationContext, task: &dyn MigrationTask, file: &Path) {
        let target = context
            .working_copy(file)
            .and_then(|wc| wc.relative_target_path())
            .map(display_path)
            .unwrap_or_else(|| "in place".to_string());
        context.logger().info(&format!(
            "[{}] {} -> {}",
            task.name(),
            display_path(file),
            target
        ));
    }

    fn record_failure(
        context: &MigrationContext,
        file: &Path,
        error: MigrationError,
        failures: &mut Vec<(PathBuf, MigrationError)>,
    ) {
        context.logger().error(&error.to_string());
        failures.push((file.to_path_buf(), error));
    }
}

impl Default for Migration {
    fn default() -> Self {
        Self::new().with_task(crate::task::JsonToJsModule::new())
    }
}
