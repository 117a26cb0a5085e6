pub mod custom_category_repository;
pub mod stats_repository;
pub mod word_repository;

pub use custom_category_repository::CustomCategoryRepository;
pub use stats_repository::JsonStatsRepository;
pub use word_repository::JsonWordRepository;
