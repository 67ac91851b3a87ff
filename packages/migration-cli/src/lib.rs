#![deny(clippy::all)]

/**
 * Scout Migration CLI
 *
 * Command line front end of the JSON model migration
 */
// Re-export the migration core for convenience
pub use scout_migration as migration;

pub mod config;
pub mod discovery;
pub mod perform_migration;

#[cfg(test)]
mod test_support;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
