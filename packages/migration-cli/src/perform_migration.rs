// Perform Migration
//
// Wires configuration, discovery, the migration core and persistence into
// one run.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use scout_migration::file_system::{FileSystem, NativeFileSystem};
use scout_migration::logging::Logger;
use scout_migration::persistence::{commit, CommitReport};
use scout_migration::{ConstMapperRegistry, Migration, MigrationContext, MigrationReport};

use crate::config::MigrationConfig;
use crate::discovery::discover_files;

#[derive(Debug)]
pub struct MigrationOutcome {
    pub report: MigrationReport,
    pub commit: CommitReport,
}

impl MigrationOutcome {
    pub fn exit_code(&self) -> i32 {
        if self.report.is_success() && self.commit.is_success() {
            0
        } else {
            1
        }
    }
}

/// Migrates the files selected by `config`, or `explicit_files` if given,
/// on the real file system.
pub fn perform_migration(
    config: &MigrationConfig,
    explicit_files: &[PathBuf],
    logger: Arc<dyn Logger>,
) -> Result<MigrationOutcome> {
    let root = config.source_root();
    let root = root
        .canonicalize()
        .with_context(|| format!("Source root {} not found", root.display()))?;

    let files = if explicit_files.is_empty() {
        discover_files(&root, &config.include, &config.exclude)?
    } else {
        explicit_files
            .iter()
            .map(|file| absolute(file))
            .collect::<Result<Vec<_>>>()?
    };
    logger.debug(&format!("{} candidate files below {}", files.len(), root.display()));

    perform_migration_on(Arc::new(NativeFileSystem::new()), &root, &files, config, logger)
}

/// Runs the migration on `files` through `fs` and commits the result.
///
/// Successfully migrated files are committed even if others failed, unless
/// `failFast` is set; then nothing is written. A file that cannot be written
/// is recorded in the outcome and does not stop the others.
pub fn perform_migration_on(
    fs: Arc<dyn FileSystem>,
    root: &Path,
    files: &[PathBuf],
    config: &MigrationConfig,
    logger: Arc<dyn Logger>,
) -> Result<MigrationOutcome> {
    let registry = ConstMapperRegistry::from_config(&config.const_placeholders);
    logger.debug(&format!("const mappers: {:?}", registry.names()));

    let mut context = MigrationContext::new(root, fs, Arc::new(registry)).with_logger(logger.clone());
    let report = Migration::default().run(files, &mut context, config.run_options());

    let commit_report = if report.is_success() || !config.fail_fast {
        commit(&context, config.dry_run)
    } else {
        logger.warn("migration failed, nothing written");
        CommitReport::default()
    };

    Ok(MigrationOutcome {
        report,
        commit: commit_report,
    })
}

fn absolute(file: &Path) -> Result<PathBuf> {
    file.canonicalize()
        .with_context(|| format!("File {} not found", file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TempDir;
    use scout_migration::file_system::testing::MockFileSystem;
    use scout_migration::file_system::ReadonlyFileSystem;
    use scout_migration::logging::NullLogger;

    const FORM: &str = r#"{"objectType": "Form", "title": "${textKey:Title}"}"#;
    const BROKEN: &str = r#"{"objectType": "Form", "iconId": "${icon:x}"}"#;

    fn mock(files: Vec<(&str, &str)>) -> MockFileSystem {
        let fs = MockFileSystem::new();
        fs.init_with_files(files);
        fs
    }

    #[test]
    fn should_commit_successful_files_despite_failures() {
        let fs = mock(vec![("/src/Form.json", FORM), ("/src/Broken.json", BROKEN)]);
        let files = vec![PathBuf::from("/src/Form.json"), PathBuf::from("/src/Broken.json")];

        let outcome = perform_migration_on(
            Arc::new(fs.clone()),
            Path::new("/src"),
            &files,
            &MigrationConfig::default(),
            Arc::new(NullLogger::new()),
        )
        .unwrap();

        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(outcome.commit.committed.len(), 1);
        assert!(fs.exists(Path::new("/src/FormModel.js")));
        assert!(fs.exists(Path::new("/src/Broken.json")));
    }

    #[test]
    fn should_write_nothing_on_failure_when_fail_fast() {
        let fs = mock(vec![("/src/Form.json", FORM), ("/src/Broken.json", BROKEN)]);
        let files = vec![PathBuf::from("/src/Form.json"), PathBuf::from("/src/Broken.json")];
        let config = MigrationConfig {
            fail_fast: true,
            ..MigrationConfig::default()
        };

        let outcome = perform_migration_on(
            Arc::new(fs.clone()),
            Path::new("/src"),
            &files,
            &config,
            Arc::new(NullLogger::new()),
        )
        .unwrap();

        assert!(outcome.commit.committed.is_empty());
        assert!(fs.exists(Path::new("/src/Form.json")));
        assert!(!fs.exists(Path::new("/src/FormModel.js")));
    }

    /// Mock file system whose writes to one path are rejected.
    struct RejectingFileSystem {
        inner: MockFileSystem,
        rejected: PathBuf,
    }

    impl ReadonlyFileSystem for RejectingFileSystem {
        fn exists(&self, path: &Path) -> bool {
            self.inner.exists(path)
        }
        fn is_file(&self, path: &Path) -> bool {
            self.inner.is_file(path)
        }
        fn read_file(&self, path: &Path) -> std::io::Result<String> {
            self.inner.read_file(path)
        }
    }

    impl FileSystem for RejectingFileSystem {
        fn write_file(&self, path: &Path, data: &str) -> std::io::Result<()> {
            if path == self.rejected {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                ));
            }
            self.inner.write_file(path, data)
        }
        fn remove_file(&self, path: &Path) -> std::io::Result<()> {
            self.inner.remove_file(path)
        }
    }

    #[test]
    fn should_report_unwritable_file_and_commit_the_rest() {
        let fs = mock(vec![("/src/Form.json", FORM), ("/src/Other.json", FORM)]);
        let files = vec![PathBuf::from("/src/Form.json"), PathBuf::from("/src/Other.json")];
        let rejecting = RejectingFileSystem {
            inner: fs.clone(),
            rejected: PathBuf::from("/src/FormModel.js"),
        };

        let outcome = perform_migration_on(
            Arc::new(rejecting),
            Path::new("/src"),
            &files,
            &MigrationConfig::default(),
            Arc::new(NullLogger::new()),
        )
        .unwrap();

        assert!(outcome.report.is_success());
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(outcome.commit.failures.len(), 1);
        assert_eq!(outcome.commit.failures[0].0, PathBuf::from("/src/Form.json"));
        assert_eq!(outcome.commit.committed.len(), 1);
        assert!(fs.exists(Path::new("/src/Form.json")));
        assert!(fs.exists(Path::new("/src/OtherModel.js")));
        assert!(!fs.exists(Path::new("/src/Other.json")));
    }

    #[test]
    fn should_migrate_directory_on_disk() {
        let tmp = TempDir::new("perform");
        tmp.write("forms/PersonForm.json", FORM);
        tmp.write("package.json", r#"{"name": "app"}"#);
        let config = MigrationConfig {
            source_root: Some(tmp.path().to_path_buf()),
            ..MigrationConfig::default()
        };

        let outcome = perform_migration(&config, &[], Arc::new(NullLogger::new())).unwrap();

        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(outcome.report.migrated.len(), 1);
        assert_eq!(outcome.report.skipped.len(), 1);
        let module = std::fs::read_to_string(tmp.path().join("forms/PersonFormModel.js")).unwrap();
        assert!(module.starts_with("import scout from '@eclipse-scout/eclipse-scout';\n\n"));
        assert!(!tmp.path().join("forms/PersonForm.json").exists());
        assert!(tmp.path().join("package.json").exists());
    }

    #[test]
    fn should_fail_for_missing_source_root() {
        let config = MigrationConfig {
            source_root: Some(PathBuf::from("/definitely/not/here")),
            ..MigrationConfig::default()
        };
        assert!(perform_migration(&config, &[], Arc::new(NullLogger::new())).is_err());
    }
}
