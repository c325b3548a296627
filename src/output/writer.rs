use chrono::Local;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes refined URLs to a timestamped file inside `dir`
///
/// The directory is created if needed. The file is named
/// `refined_<YYYY-mm-dd_HHMMSS>.txt` and holds one URL per line.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(std::io::Error)` - The directory or file could not be written
pub fn write_refined(urls: &[String], dir: &Path) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let timestamp = Local::now().format("%Y-%m-%d_%H%M%S");
    let path = dir.join(format!("refined_{}.txt", timestamp));

    let mut file = fs::File::create(&path)?;
    for url in urls {
        writeln!(file, "{}", url)?;
    }
    file.flush()?;

    tracing::debug!("Wrote {} URLs to {}", urls.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_refined() {
        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("output");
        let urls = vec!["http://a.com/".to_string(), "http://b.com/x".to_string()];

        let path = write_refined(&urls, &out_dir).unwrap();

        assert!(path.starts_with(&out_dir));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("refined_"));
        assert!(name.ends_with(".txt"));

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "http://a.com/\nhttp://b.com/x\n");
    }

    #[test]
    fn test_write_refined_into_file_path_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        assert!(write_refined(&[], &blocker).is_err());
    }
}
