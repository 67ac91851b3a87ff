//! File System Abstraction
//!
//! The migration never touches `std::fs` directly; everything goes through
//! these traits so runs can be simulated in memory.

pub mod native_file_system;
pub mod testing;
pub mod types;
pub mod util;

pub use native_file_system::*;
pub use types::*;
pub use util::*;
