use std::path::Path;

/// Convert Windows-style separators to POSIX separators.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Display form of a path with forward slashes, used in generated messages.
pub fn display_path(path: &Path) -> String {
    normalize_separators(&path.to_string_lossy())
}

/// Whether the final extension of `path` is exactly `extension` (no dot, case-sensitive).
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}
