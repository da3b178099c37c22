// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Full-replacement write: the complete contents land in a sibling temp file
/// which is renamed over the target, so a crash mid-run leaves prior state
/// intact. Never writes line-by-line.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_whole_file() {
        let mut p = std::env::temp_dir();
        p.push("slam_scrape_file_test.csv");
        write_atomic(&p, "a,b\n").unwrap();
        write_atomic(&p, "c,d\n").unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "c,d\n");
        assert!(!tmp_path(&p).exists());
        let _ = fs::remove_file(&p);
    }
}
