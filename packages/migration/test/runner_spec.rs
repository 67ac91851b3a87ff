//! Migration Runner Tests

use std::path::{Path, PathBuf};
use std::sync::Arc;

use scout_migration::file_system::testing::MockFileSystem;
use scout_migration::file_system::ReadonlyFileSystem;
use scout_migration::logging::{LogLevel, MemoryLogger};
use scout_migration::persistence::commit;
use scout_migration::placeholder::mapper::{ConstMapperRegistry, ConstMappingConfig};
use scout_migration::{Migration, MigrationContext, MigrationError, RunOptions};

const ROOT: &str = "/app/src";

fn files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("/app/src/Desktop.json", r#"{"objectType": "Desktop", "title": "${textKey:App}"}"#),
        (
            "/app/src/person/PersonForm.json",
            r#"{"objectType": "Form", "labelPosition": "${const:FormField.LabelPosition.TOP}"}"#,
        ),
        ("/app/src/person/Broken.json", r#"{"objectType": "Form", "x": "${bogus:1}"}"#),
        ("/app/src/package.json", r#"{"name": "app"}"#),
        ("/app/src/index.js", "import './App';"),
    ]
}

fn paths() -> Vec<PathBuf> {
    files().into_iter().map(|(p, _)| PathBuf::from(p)).collect()
}

fn setup() -> (MockFileSystem, Arc<MemoryLogger>, MigrationContext) {
    let fs = MockFileSystem::new();
    fs.init_with_files(files());
    let config: ConstMappingConfig =
        serde_json::from_str(r#"{"qualifiedConstSymbols": ["FormField"]}"#).unwrap();
    let logger = Arc::new(MemoryLogger::new(LogLevel::Debug));
    let ctx = MigrationContext::new(
        ROOT,
        Arc::new(fs.clone()),
        Arc::new(ConstMapperRegistry::from_config(&config)),
    )
    .with_logger(logger.clone());
    (fs, logger, ctx)
}

fn assert_report(report: &scout_migration::MigrationReport) {
    assert_eq!(
        report.migrated,
        vec![
            PathBuf::from("/app/src/Desktop.json"),
            PathBuf::from("/app/src/person/PersonForm.json"),
        ]
    );
    assert_eq!(
        report.skipped,
        vec![
            PathBuf::from("/app/src/package.json"),
            PathBuf::from("/app/src/index.js"),
        ]
    );
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, PathBuf::from("/app/src/person/Broken.json"));
    assert!(matches!(
        report.failures[0].1,
        MigrationError::UnknownPlaceholder { .. }
    ));
    assert!(!report.is_success());
}

#[test]
fn should_continue_after_failing_file() {
    let (_fs, logger, mut ctx) = setup();

    let report = Migration::default().run(&paths(), &mut ctx, RunOptions::default());

    assert_report(&report);
    assert_eq!(report.summary(), "2 migrated, 2 skipped, 1 failed");
    let lines = logger.lines();
    assert!(lines
        .iter()
        .any(|(level, msg)| *level == LogLevel::Error && msg.contains("'bogus'")));
    assert!(lines
        .iter()
        .any(|(level, msg)| *level == LogLevel::Info && msg.contains("person/PersonFormModel.js")));
}

#[test]
fn should_produce_same_result_in_parallel() {
    let (_fs, _logger, mut sequential_ctx) = setup();
    let sequential = Migration::default().run(&paths(), &mut sequential_ctx, RunOptions::default());

    let (_fs, _logger, mut parallel_ctx) = setup();
    let parallel = Migration::default().run(
        &paths(),
        &mut parallel_ctx,
        RunOptions {
            fail_fast: false,
            jobs: 4,
        },
    );

    assert_report(&sequential);
    assert_report(&parallel);
    for file in &sequential.migrated {
        assert_eq!(
            sequential_ctx.working_copy(file).map(|wc| wc.source()),
            parallel_ctx.working_copy(file).map(|wc| wc.source())
        );
    }
}

#[test]
fn should_stop_at_first_failure_when_fail_fast() {
    let (_fs, _logger, mut ctx) = setup();

    let report = Migration::default().run(
        &paths(),
        &mut ctx,
        RunOptions {
            fail_fast: true,
            jobs: 1,
        },
    );

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.migrated.len(), 2);
    // files after the failure are never looked at
    assert!(ctx.working_copy(Path::new("/app/src/package.json")).is_none());
}

#[test]
fn should_write_modules_and_remove_models_on_commit() {
    let (fs, _logger, mut ctx) = setup();
    Migration::default().run(&paths(), &mut ctx, RunOptions::default());

    let committed = commit(&ctx, false);

    assert!(committed.is_success());
    assert_eq!(committed.committed.len(), 2);
    assert!(!fs.exists(Path::new("/app/src/Desktop.json")));
    assert!(fs.exists(Path::new("/app/src/person/Broken.json")));
    assert!(fs.exists(Path::new("/app/src/package.json")));

    let person = fs
        .read_file(Path::new("/app/src/person/PersonFormModel.js"))
        .unwrap();
    assert_eq!(
        person,
        "import { FormField } from '@eclipse-scout/eclipse-scout';\n\n\
         export default function(modelOwner) {\n  \
         return {objectType: 'Form', labelPosition: FormField.LabelPosition.TOP};\n\
         }\n"
    );
}

#[test]
fn should_report_existing_target_as_failure() {
    let (fs, _logger, mut ctx) = setup();
    fs.init_with_files(vec![("/app/src/DesktopModel.js", "export default {};")]);

    let report = Migration::default().run(&paths(), &mut ctx, RunOptions::default());

    assert!(report
        .failures
        .iter()
        .any(|(file, err)| file == Path::new("/app/src/Desktop.json")
            && matches!(err, MigrationError::TargetExists { .. })));
    assert_eq!(
        fs.read_file(Path::new("/app/src/DesktopModel.js")).unwrap(),
        "export default {};"
    );
}
