/**
 * Scout Migration CLI - json-to-js
 *
 * Migrates Scout JSON model files to ES6 model modules
 */
use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use scout_migration_cli::config::{CliOverrides, MigrationConfig};
use scout_migration_cli::migration::logging::ConsoleLogger;
use scout_migration_cli::perform_migration::perform_migration;

fn main() {
    let matches = Command::new("json-to-js")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Migrates Scout JSON model files (*.json) to model modules (*Model.js)")
        .arg(
            Arg::new("root")
                .long("root")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Source root directory (default: current directory)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Path to a migration config file (JSON)"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Report what would be written without touching any file"),
        )
        .arg(
            Arg::new("fail-fast")
                .long("fail-fast")
                .action(ArgAction::SetTrue)
                .help("Stop at the first failing file and write nothing"),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Number of worker threads"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("debug, info, warn or error"),
        )
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .num_args(0..)
                .value_parser(value_parser!(PathBuf))
                .help("Files to migrate instead of searching the source root"),
        )
        .get_matches();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => match MigrationConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                process::exit(2);
            }
        },
        None => MigrationConfig::default(),
    };

    let overrides = CliOverrides {
        source_root: matches.get_one::<PathBuf>("root").cloned(),
        dry_run: matches.get_flag("dry-run"),
        fail_fast: matches.get_flag("fail-fast"),
        jobs: matches.get_one::<usize>("jobs").copied(),
        log_level: matches.get_one::<String>("log-level").cloned(),
    };
    let config = config.apply(&overrides);

    let level = match config.log_level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    match perform_migration(&config, &files, Arc::new(ConsoleLogger::new(level))) {
        Ok(outcome) => {
            for file in &outcome.commit.committed {
                println!("{} -> {}", file.source.display(), file.destination.display());
            }
            for (file, error) in &outcome.report.failures {
                eprintln!("Failed: {}: {}", file.display(), error);
            }
            for (file, error) in &outcome.commit.failures {
                eprintln!("Not written: {}: {}", file.display(), error);
            }
            process::exit(outcome.exit_code());
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}
