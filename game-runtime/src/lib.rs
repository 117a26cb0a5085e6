pub mod config;
pub mod scheduler;
pub mod session;

pub use config::Config;
pub use scheduler::TokioScheduler;
pub use session::{RoundSession, SessionCommand, SessionError, SessionHandle, SpawnedSession};
