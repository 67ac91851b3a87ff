//! Configuration of a migration run.

pub mod migration;

pub use migration::{CliOverrides, MigrationConfig};
