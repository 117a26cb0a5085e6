pub mod clock;
pub mod config;
pub mod errors;
pub mod game_events;
pub mod gesture;
pub mod round_controller;
pub mod scheduler;
pub mod traits;
pub mod turns;
pub mod word_cycler;

// Re-export main components
pub use clock::*;
pub use config::*;
pub use errors::*;
pub use game_events::*;
pub use gesture::*;
pub use round_controller::*;
pub use scheduler::*;
pub use traits::*;
pub use turns::*;
pub use word_cycler::*;
