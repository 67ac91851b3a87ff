use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::file_system::types::{FileSystem, ReadonlyFileSystem};

/// In-memory file system. Directories exist implicitly as prefixes of files.
#[derive(Clone, Debug, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init_with_files(&self, files: Vec<(&str, &str)>) {
        if let Ok(mut tree) = self.tree() {
            for (path, content) in files {
                tree.insert(PathBuf::from(path), content.to_string());
            }
        }
    }

    /// All file paths currently stored, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.tree()
            .map(|tree| tree.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn tree(&self) -> io::Result<MutexGuard<'_, BTreeMap<PathBuf, String>>> {
        self.files
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "mock file system poisoned"))
    }
}

impl ReadonlyFileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        match self.tree() {
            Ok(tree) => tree.keys().any(|p| p.starts_with(path)),
            Err(_) => false,
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        self.tree().is_ok_and(|tree| tree.contains_key(path))
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        self.tree()?.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })
    }
}

impl FileSystem for MockFileSystem {
    fn write_file(&self, path: &Path, data: &str) -> io::Result<()> {
        self.tree()?.insert(path.to_path_buf(), data.to_string());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.tree()?.remove(path).map(|_| ()).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })
    }
}
