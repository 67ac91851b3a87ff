//! JSON Model to JS Module
//!
//! Migrates `Xyz.json` model files (those declaring an `objectType`) into
//! `XyzModel.js` ES6 modules exporting a factory function.

use std::path::{Path, PathBuf};

use super::{MigrationTask, TaskOutput};
use crate::context::MigrationContext;
use crate::error::Result;
use crate::file_system::has_extension;
use crate::placeholder::migrate_placeholders;
use crate::transformer::json_to_module;

pub const JSON_EXTENSION: &str = "json";
pub const JS_EXTENSION: &str = "js";
pub const JSON_MODEL_NAME_SUFFIX: &str = "Model";
pub const OBJECT_TYPE_MARKER: &str = "\"objectType\":";

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonToJsModule;

impl JsonToJsModule {
    pub fn new() -> Self {
        Self
    }

    pub fn is_eligible(file: &Path, source: &str) -> bool {
        has_extension(file, JSON_EXTENSION) && source.contains(OBJECT_TYPE_MARKER)
    }

    /// `Form.json` becomes `FormModel.js`.
    pub fn target_file_name(file: &Path) -> String {
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{}{}.{}", stem, JSON_MODEL_NAME_SUFFIX, JS_EXTENSION)
    }

    /// Target of `relative_file`, in the same relative directory.
    pub fn target_path(relative_file: &Path) -> PathBuf {
        relative_file.with_file_name(Self::target_file_name(relative_file))
    }

    /// Rewrites the model text into the final module text.
    pub fn migrate_source(source: &str, file: &Path, context: &MigrationContext) -> Result<String> {
        let module = json_to_module(source);
        migrate_placeholders(&module, file, context)
    }
}

impl MigrationTask for JsonToJsModule {
    fn name(&self) -> &str {
        "json-to-js-module"
    }

    fn accepts_path(&self, file: &Path) -> bool {
        has_extension(file, JSON_EXTENSION)
    }

    fn accepts_source(&self, file: &Path, source: &str) -> bool {
        Self::is_eligible(file, source)
    }

    fn transform(
        &self,
        file: &Path,
        source: &str,
        context: &MigrationContext,
    ) -> Result<TaskOutput> {
        let migrated = Self::migrate_source(source, file, context)?;
        let relative_file = context.relativize(file)?;
        Ok(TaskOutput {
            source: migrated,
            relative_target_path: Some(Self::target_path(&relative_file)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_require_extension_and_marker() {
        let model = r#"{"objectType": "Form"}"#;
        assert!(JsonToJsModule::is_eligible(Path::new("a/Form.json"), model));
        assert!(!JsonToJsModule::is_eligible(Path::new("a/Form.js"), model));
        assert!(!JsonToJsModule::is_eligible(Path::new("a/Form.json"), r#"{"id": "Form"}"#));
        assert!(!JsonToJsModule::is_eligible(Path::new("a/Form.json"), "{objectType: 'Form'}"));
    }

    #[test]
    fn should_compute_target_in_same_directory() {
        assert_eq!(
            JsonToJsModule::target_path(Path::new("forms/person/PersonForm.json")),
            PathBuf::from("forms/person/PersonFormModel.js")
        );
        assert_eq!(
            JsonToJsModule::target_path(Path::new("Desktop.json")),
            PathBuf::from("DesktopModel.js")
        );
        assert_eq!(JsonToJsModule::target_file_name(Path::new("a.b.json")), "a.bModel.js");
    }
}
