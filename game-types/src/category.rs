use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Label used for results played over every predefined category.
pub const ALL_CATEGORIES_LABEL: &str = "all";

/// Where a word pool comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    /// Bundled word list stored as `{ "words": [...] }` in the assets directory.
    Predefined { file_name: String, display_name: String },
    /// Word list entered by the players.
    Custom { display_name: String, words: Vec<String> },
}

impl Category {
    pub fn predefined(file_name: &str, display_name: &str) -> Self {
        Category::Predefined {
            file_name: file_name.to_string(),
            display_name: display_name.to_string(),
        }
    }

    pub fn custom(display_name: impl Into<String>, words: Vec<String>) -> Self {
        Category::Custom {
            display_name: display_name.into(),
            words,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Category::Predefined { display_name, .. } => display_name,
            Category::Custom { display_name, .. } => display_name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Category::Custom { .. })
    }

    /// The bundled categories shipped with the game.
    pub fn catalogue() -> Vec<Category> {
        [
            ("animals.json", "Animals"),
            ("sports.json", "Sports"),
            ("foods.json", "Food"),
            ("people.json", "People"),
            ("peopleLT.json", "People (Lithuanian)"),
            ("objects.json", "Objects"),
            ("movies.json", "Movies & Series"),
            ("animations.json", "Animations"),
            ("places.json", "Places"),
            ("videogames.json", "Video Games"),
            ("professions.json", "Professions"),
            ("actions.json", "Actions"),
        ]
        .iter()
        .map(|(file, name)| Category::predefined(file, name))
        .collect()
    }
}

/// Label stored in results: the category name, or `None` for "all categories".
pub fn category_label(category: Option<&Category>) -> Option<String> {
    category.map(|c| c.display_name().to_string())
}
