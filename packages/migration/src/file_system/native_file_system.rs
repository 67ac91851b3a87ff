use crate::file_system::types::{FileSystem, ReadonlyFileSystem};
use std::fs;
use std::io;
use std::path::Path;

/// File system backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeFileSystem;

impl NativeFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl ReadonlyFileSystem for NativeFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

impl FileSystem for NativeFileSystem {
    fn write_file(&self, path: &Path, data: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, data)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}
