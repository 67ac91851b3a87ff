use std::io;
use std::path::Path;

/// An abstraction over the read-only aspects of a file-system.
pub trait ReadonlyFileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    fn read_file(&self, path: &Path) -> io::Result<String>;
}

/// A basic interface to abstract the underlying file-system.
pub trait FileSystem: ReadonlyFileSystem {
    /// Write `data` to `path`, creating missing parent directories.
    fn write_file(&self, path: &Path, data: &str) -> io::Result<()>;
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}
