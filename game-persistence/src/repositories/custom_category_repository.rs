use game_types::Category;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::storage::{read_json, write_json};
use crate::StorageResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomCategoryRecord {
    display_name: String,
    words: Vec<String>,
}

/// Player-made categories stored in `custom_categories.json`.
pub struct CustomCategoryRepository {
    path: PathBuf,
}

impl CustomCategoryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_all(&self) -> StorageResult<Vec<Category>> {
        let records: Vec<CustomCategoryRecord> = read_json(&self.path)?;
        Ok(records
            .into_iter()
            .map(|r| Category::custom(r.display_name, r.words))
            .collect())
    }

    pub fn find(&self, display_name: &str) -> StorageResult<Option<Category>> {
        Ok(self
            .load_all()?
            .into_iter()
            .find(|c| c.display_name() == display_name))
    }

    /// Replaces the stored list. Predefined categories are skipped.
    pub fn save_all(&self, categories: &[Category]) -> StorageResult<()> {
        let records: Vec<CustomCategoryRecord> = categories
            .iter()
            .filter_map(|c| match c {
                Category::Custom { display_name, words } => Some(CustomCategoryRecord {
                    display_name: display_name.clone(),
                    words: words.clone(),
                }),
                Category::Predefined { .. } => None,
            })
            .collect();
        write_json(&self.path, &records)
    }

    /// Adds a category, or replaces the words of the one with the same name.
    pub fn upsert(&self, display_name: &str, words: Vec<String>) -> StorageResult<Category> {
        let category = Category::custom(display_name, words);
        let mut categories = self.load_all()?;

        match categories.iter_mut().find(|c| c.display_name() == display_name) {
            Some(existing) => *existing = category.clone(),
            None => categories.push(category.clone()),
        }

        self.save_all(&categories)?;
        info!("Saved custom category '{}'", display_name);
        Ok(category)
    }

    /// Returns whether a category with that name existed.
    pub fn delete(&self, display_name: &str) -> StorageResult<bool> {
        let mut categories = self.load_all()?;
        let before = categories.len();
        categories.retain(|c| c.display_name() != display_name);

        if categories.len() == before {
            return Ok(false);
        }
        self.save_all(&categories)?;
        info!("Deleted custom category '{}'", display_name);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_missing_file_has_no_categories() {
        let temp = TempDir::new().unwrap();
        let repo = CustomCategoryRepository::new(temp.path().join("custom_categories.json"));
        assert!(repo.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_then_replace_then_delete() {
        let temp = TempDir::new().unwrap();
        let repo = CustomCategoryRepository::new(temp.path().join("custom_categories.json"));

        repo.upsert("Office", words(&["Stapler"])).unwrap();
        repo.upsert("Family", words(&["Grandma"])).unwrap();
        repo.upsert("Office", words(&["Printer", "Desk"])).unwrap();

        let all = repo.load_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(
            repo.find("Office").unwrap(),
            Some(Category::custom("Office", words(&["Printer", "Desk"])))
        );

        assert!(repo.delete("Office").unwrap());
        assert!(!repo.delete("Office").unwrap());
        assert_eq!(repo.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_reads_camel_case_file_with_extra_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom_categories.json");
        fs::write(
            &path,
            r#"[{"displayName": "Office", "words": ["Stapler"], "color": "red"}]"#,
        )
        .unwrap();

        let repo = CustomCategoryRepository::new(path);
        assert_eq!(
            repo.load_all().unwrap(),
            vec![Category::custom("Office", words(&["Stapler"]))]
        );
    }

    #[test]
    fn test_predefined_categories_are_not_saved() {
        let temp = TempDir::new().unwrap();
        let repo = CustomCategoryRepository::new(temp.path().join("custom_categories.json"));

        repo.save_all(&[
            Category::predefined("animals.json", "Animals"),
            Category::custom("Office", words(&["Stapler"])),
        ])
        .unwrap();

        assert_eq!(repo.load_all().unwrap().len(), 1);
    }
}
