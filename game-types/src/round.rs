use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

/// Sentinel for `RoundState::time_remaining` when the round has no time limit.
pub const UNLIMITED_TIME: i32 = -1;

/// Number of steps in the pre-play countdown (3-2-1).
pub const COUNTDOWN_START: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundPhase {
    Idle,      // Settings committed, waiting for the turn to start
    Countdown, // 3-2-1 before play, gestures ignored
    Active,    // Words are shown and gestures are scored
    Ended,     // Terminal for this round instance
}

/// Discrete gameplay gesture produced by tilting the phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Gesture {
    Correct, // Tilted forward (face down)
    Skip,    // Tilted backward (face up)
}

impl Gesture {
    /// Points awarded for this gesture. Skips never cost points.
    pub fn points(self) -> u32 {
        match self {
            Gesture::Correct => 1,
            Gesture::Skip => 0,
        }
    }
}

/// Snapshot of the round as seen by the presentation layer.
///
/// Snapshots are never mutated in place; every transition produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundState {
    pub score: u32,
    pub current_word: String,
    pub used_words: HashSet<String>,
    pub time_remaining: i32, // UNLIMITED_TIME when there is no limit
    pub phase: RoundPhase,
    pub countdown_value: u8, // Only meaningful during Countdown
}

impl RoundState {
    /// A fresh idle state for a turn with the given time budget.
    pub fn idle(time_remaining: i32) -> Self {
        Self {
            score: 0,
            current_word: String::new(),
            used_words: HashSet::new(),
            time_remaining,
            phase: RoundPhase::Idle,
            countdown_value: COUNTDOWN_START,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        self.time_remaining == UNLIMITED_TIME
    }

    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::idle(UNLIMITED_TIME)
    }
}
