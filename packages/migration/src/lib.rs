#![deny(clippy::all)]

/**
 * Scout Migration - Rust Implementation
 *
 * Rewrites legacy Scout JSON model files into ES6 model modules
 */
pub mod context;
pub mod error;
pub mod file_system;
pub mod imports;
pub mod logging;
pub mod persistence;
pub mod placeholder;
pub mod runner;
pub mod task;
pub mod transformer;
pub mod working_copy;

pub use context::MigrationContext;
pub use error::{MigrationError, Result};
pub use imports::ImportSet;
pub use placeholder::mapper::{ConstMapperRegistry, ConstPlaceholderMapper};
pub use runner::{Migration, MigrationReport, RunOptions};
pub use task::{JsonToJsModule, MigrationTask};
pub use working_copy::WorkingCopy;

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
