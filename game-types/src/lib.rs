pub mod category;
pub mod errors;
pub mod participant;
pub mod result;
pub mod round;
pub mod settings;

// Re-export all types
pub use category::*;
pub use errors::*;
pub use participant::*;
pub use result::*;
pub use round::*;
pub use settings::*;
