//! Logging
//!
//! Minimal logger abstraction used by the migration driver.

pub mod console_logger;
pub mod logger;


pub use console_logger::*;
pub use logger::*;
