use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use scout_migration::logging::LogLevel;
use scout_migration::placeholder::mapper::ConstMappingConfig;
use scout_migration::RunOptions;

/// Contents of a migration config file (JSON).
///
/// ```json
/// {
///   "sourceRoot": "src/main/js",
///   "include": ["**/*.json"],
///   "exclude": ["**/node_modules/**"],
///   "qualifiedConstSymbols": ["FormField", "Button"],
///   "constMappings": [
///     { "key": "displayStyle", "value": "DEFAULT", "replacement": "Form.DisplayStyle.DEFAULT", "imports": ["Form"] }
///   ],
///   "dryRun": false,
///   "failFast": false,
///   "jobs": 4,
///   "logLevel": "info"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationConfig {
    pub source_root: Option<PathBuf>,
    #[serde(default = "default_include")]
    pub include: Vec<String>,
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
    #[serde(flatten)]
    pub const_placeholders: ConstMappingConfig,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub fail_fast: bool,
    pub jobs: Option<usize>,
    pub log_level: Option<String>,
}

fn default_include() -> Vec<String> {
    vec!["**/*.json".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            source_root: None,
            include: default_include(),
            exclude: default_exclude(),
            const_placeholders: ConstMappingConfig::default(),
            dry_run: false,
            fail_fast: false,
            jobs: None,
            log_level: None,
        }
    }
}

/// Values given on the command line. They win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub source_root: Option<PathBuf>,
    pub dry_run: bool,
    pub fail_fast: bool,
    pub jobs: Option<usize>,
    pub log_level: Option<String>,
}

impl MigrationConfig {
    /// Loads a config file. A relative `sourceRoot` is resolved against the
    /// directory of the file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: MigrationConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        if let Some(root) = config.source_root.take() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            config.source_root = Some(if root.is_absolute() { root } else { base.join(root) });
        }
        Ok(config)
    }

    pub fn apply(mut self, overrides: &CliOverrides) -> Self {
        if let Some(root) = &overrides.source_root {
            self.source_root = Some(root.clone());
        }
        self.dry_run |= overrides.dry_run;
        self.fail_fast |= overrides.fail_fast;
        if overrides.jobs.is_some() {
            self.jobs = overrides.jobs;
        }
        if overrides.log_level.is_some() {
            self.log_level = overrides.log_level.clone();
        }
        self
    }

    pub fn source_root(&self) -> PathBuf {
        self.source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn log_level(&self) -> anyhow::Result<LogLevel> {
        match &self.log_level {
            Some(level) => level.parse().map_err(anyhow::Error::msg),
            None => Ok(LogLevel::Info),
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            fail_fast: self.fail_fast,
            jobs: self.jobs.unwrap_or(1).max(1),
        }
    }
}
