use crate::{Error, Result};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};

/// List the log files of a directory in name order.
///
/// Hidden files and subdirectories are skipped. When `pattern` is given only file names
/// matching the glob (e.g. `*.jtl`) are returned.
pub fn discover_logs(dir: &Path, pattern: Option<&str>) -> Result<Vec<PathBuf>> {
    let pattern = pattern
        .map(|p| {
            Pattern::new(p)
                .map_err(|e| Error::InvalidPattern(format!("Invalid glob pattern '{}': {}", p, e)))
        })
        .transpose()?;

    let mut logs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        if let Some(pattern) = &pattern
            && !pattern.matches(&name)
        {
            tracing::debug!("Skipping {} (does not match {})", name, pattern);
            continue;
        }

        logs.push(entry.path());
    }
    logs.sort();

    tracing::debug!("Found {} log files in {}", logs.len(), dir.display());
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_lists_visible_files_in_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b-http-1.csv"), "").unwrap();
        fs::write(dir.path().join("a-https-1.csv"), "").unwrap();
        fs::write(dir.path().join(".DS_Store"), "").unwrap();
        fs::create_dir(dir.path().join("summary")).unwrap();

        let logs = discover_logs(dir.path(), None).unwrap();
        assert_eq!(names(&logs), vec!["a-https-1.csv", "b-http-1.csv"]);
    }

    #[test]
    fn test_glob_filter() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("run.jtl"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let logs = discover_logs(dir.path(), Some("*.jtl")).unwrap();
        assert_eq!(names(&logs), vec!["run.jtl"]);
    }

    #[test]
    fn test_invalid_glob() {
        let dir = TempDir::new().unwrap();
        let err = discover_logs(dir.path(), Some("[")).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }
}
