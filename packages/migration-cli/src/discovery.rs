//! File Discovery
//!
//! Expands the include globs below the source root.

use anyhow::{Context, Result};
use glob::{glob, Pattern};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Files below `root` matching any `include` glob and no `exclude` glob,
/// sorted and de-duplicated. Globs are relative to `root`.
pub fn discover_files(root: &Path, include: &[String], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let excludes = exclude
        .iter()
        .map(|excl| {
            let full = root.join(excl);
            Pattern::new(&full.to_string_lossy())
                .with_context(|| format!("Invalid exclude pattern '{}'", excl))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut files = BTreeSet::new();
    for pattern in include {
        let full = root.join(pattern);
        let entries = glob(&full.to_string_lossy())
            .with_context(|| format!("Invalid include pattern '{}'", pattern))?;
        for entry in entries {
            let path = entry?;
            if path.is_file() && !excludes.iter().any(|p| p.matches_path(&path)) {
                files.insert(path);
            }
        }
    }

    Ok(files.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TempDir;

    #[test]
    fn should_find_included_files_sorted() {
        let tmp = TempDir::new("discover");
        tmp.write("b/Form.json", "{}");
        tmp.write("a/Desktop.json", "{}");
        tmp.write("a/index.js", "");

        let files = discover_files(tmp.path(), &["**/*.json".to_string()], &[]).unwrap();

        assert_eq!(
            files,
            vec![tmp.path().join("a/Desktop.json"), tmp.path().join("b/Form.json")]
        );
    }

    #[test]
    fn should_drop_excluded_and_duplicate_matches() {
        let tmp = TempDir::new("discover_exclude");
        tmp.write("Form.json", "{}");
        tmp.write("node_modules/lib/Form.json", "{}");

        let files = discover_files(
            tmp.path(),
            &["**/*.json".to_string(), "*.json".to_string()],
            &["**/node_modules/**".to_string()],
        )
        .unwrap();

        assert_eq!(files, vec![tmp.path().join("Form.json")]);
    }

    #[test]
    fn should_reject_invalid_pattern() {
        let tmp = TempDir::new("discover_invalid");
        assert!(discover_files(tmp.path(), &["[".to_string()], &[]).is_err());
    }
}
