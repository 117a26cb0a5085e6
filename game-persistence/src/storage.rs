use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::repositories::{CustomCategoryRepository, JsonStatsRepository};
use crate::StorageResult;

pub const STATS_FILE: &str = "game_statistics.json";
pub const CUSTOM_CATEGORIES_FILE: &str = "custom_categories.json";

/// The app's private data directory.
pub struct StorageRoot {
    data_dir: PathBuf,
}

impl StorageRoot {
    pub fn open(data_dir: impl AsRef<Path>) -> StorageResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;
        tracing::debug!("Using data directory {}", data_dir.display());
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn stats_repository(&self) -> JsonStatsRepository {
        JsonStatsRepository::new(self.data_dir.join(STATS_FILE))
    }

    pub fn custom_category_repository(&self) -> CustomCategoryRepository {
        CustomCategoryRepository::new(self.data_dir.join(CUSTOM_CATEGORIES_FILE))
    }
}

/// Reads a JSON snapshot. A missing file reads as the default value.
pub(crate) fn read_json<T: DeserializeOwned + Default>(path: &Path) -> StorageResult<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Replaces a JSON snapshot through a temp file and rename.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(value)?;

    fs::write(&temp_path, bytes)?;
    fs::rename(&temp_path, path)?;

    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");

        let root = StorageRoot::open(&nested).unwrap();

        assert!(nested.is_dir());
        assert_eq!(root.data_dir(), nested.as_path());
    }

    #[test]
    fn test_missing_file_reads_default() {
        let temp = TempDir::new().unwrap();
        let value: Vec<String> = read_json(&temp.path().join("none.json")).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("words.json");

        write_json(&path, &vec!["Dog".to_string()]).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        let value: Vec<String> = read_json(&path).unwrap();
        assert_eq!(value, vec!["Dog".to_string()]);
    }
}
