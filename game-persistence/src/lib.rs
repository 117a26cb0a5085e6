pub mod error;
pub mod repositories;
pub mod storage;

pub use error::{StorageError, StorageResult};
pub use repositories::{CustomCategoryRepository, JsonStatsRepository, JsonWordRepository};
pub use storage::StorageRoot;
