//! Testing helpers for the file system abstraction.

pub mod mock_file_system;

pub use mock_file_system::MockFileSystem;
