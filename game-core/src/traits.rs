//! Contracts for the collaborators the round engine talks to.

use game_types::{Category, GameResult};
use std::collections::HashSet;
use thiserror::Error;

use crate::clock::TickToken;

/// Errors surfaced by store implementations.
///
/// The controller never propagates these: a failed save is logged and the
/// round still completes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("store lock was poisoned")]
    LockPoisoned,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Supplies the word pool for a category.
///
/// `None` selects every predefined category. Missing or unreadable assets
/// degrade to an empty pool rather than an error.
pub trait WordSource: Send {
    fn load_words(&self, category: Option<&Category>) -> Vec<String>;
}

/// Append-only history of finished matches.
pub trait StatsStore: Send {
    fn append(&mut self, result: &GameResult) -> StoreResult<()>;

    /// Every stored result, newest first.
    fn load_all(&self) -> StoreResult<Vec<GameResult>>;

    fn clear(&mut self) -> StoreResult<()>;
}

/// Words shown in earlier matches, for the cross-session "don't repeat" rule.
pub trait SeenWordsStore: Send {
    fn load(&self) -> StoreResult<HashSet<String>>;

    fn add_all(&mut self, words: &HashSet<String>) -> StoreResult<()>;

    fn clear(&mut self) -> StoreResult<()>;
}

/// Which of the controller's clocks a tick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Countdown,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduledTick {
    pub timer: TimerKind,
    pub token: TickToken,
}

/// Delivers a tick back to the controller one second after it was scheduled.
///
/// Implementations must post the tick onto the same sequence as every other
/// controller input; they never call into the controller concurrently.
pub trait TickScheduler: Send {
    fn schedule(&mut self, tick: ScheduledTick);
}

/// Seen-words store for matches that only exclude words within the session.
#[derive(Debug, Default)]
pub struct NoSeenWords;

impl SeenWordsStore for NoSeenWords {
    fn load(&self) -> StoreResult<HashSet<String>> {
        Ok(HashSet::new())
    }

    fn add_all(&mut self, _words: &HashSet<String>) -> StoreResult<()> {
        Ok(())
    }

    fn clear(&mut self) -> StoreResult<()> {
        Ok(())
    }
}
