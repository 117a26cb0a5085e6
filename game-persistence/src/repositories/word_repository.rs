use game_core::WordSource;
use game_types::Category;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::StorageResult;

/// Bundled category file: `{ "words": [...] }`.
#[derive(Debug, Deserialize)]
struct WordList {
    words: Vec<String>,
}

/// Word pools read from the bundled category files.
#[derive(Debug, Clone)]
pub struct JsonWordRepository {
    assets_dir: PathBuf,
}

impl JsonWordRepository {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn load_file(&self, file_name: &str) -> StorageResult<Vec<String>> {
        let bytes = fs::read(self.assets_dir.join(file_name))?;
        let list: WordList = serde_json::from_slice(&bytes)?;
        Ok(list.words)
    }

    fn load_predefined(&self, file_name: &str) -> Vec<String> {
        match self.load_file(file_name) {
            Ok(words) => {
                debug!("Loaded {} words from {}", words.len(), file_name);
                words
            }
            Err(err) => {
                warn!("Could not load category file {}: {}", file_name, err);
                Vec::new()
            }
        }
    }
}

impl WordSource for JsonWordRepository {
    fn load_words(&self, category: Option<&Category>) -> Vec<String> {
        let words = match category {
            Some(Category::Predefined { file_name, .. }) => self.load_predefined(file_name),
            Some(Category::Custom { words, .. }) => words.clone(),
            None => Category::catalogue()
                .iter()
                .filter_map(|c| match c {
                    Category::Predefined { file_name, .. } => Some(self.load_predefined(file_name)),
                    Category::Custom { .. } => None,
                })
                .flatten()
                .collect(),
        };
        into_pool(words)
    }
}

/// Trims entries and drops blanks and duplicates, keeping first occurrences.
fn into_pool(words: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .into_iter()
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty() && seen.insert(w.clone()))
        .collect()
}
