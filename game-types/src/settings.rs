use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{Category, UNLIMITED_TIME};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TimerSetting {
    Limited(u32),
    Unlimited,
}

impl TimerSetting {
    /// Seconds as stored in snapshots and results; `UNLIMITED_TIME` for no limit.
    pub fn as_seconds(self) -> i32 {
        match self {
            TimerSetting::Limited(seconds) => seconds.min(i32::MAX as u32) as i32,
            TimerSetting::Unlimited => UNLIMITED_TIME,
        }
    }

    pub fn from_seconds(seconds: i32) -> Self {
        if seconds < 0 {
            TimerSetting::Unlimited
        } else {
            TimerSetting::Limited(seconds as u32)
        }
    }
}

impl Default for TimerSetting {
    fn default() -> Self {
        TimerSetting::Limited(60)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MatchMode {
    SinglePlayer,
    MultiPlayer,
    Teams, // Teams take turns exactly like individual players
}

/// Scope of the "don't repeat words" rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RepeatPolicy {
    PerSession,     // Words are only excluded within the current match
    AcrossSessions, // Words seen in earlier matches are excluded as well
}

/// Everything committed on the settings screen before a match starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchSettings {
    pub mode: MatchMode,
    pub participant_names: Vec<String>,
    pub rounds_per_participant: u32,
    pub timer: TimerSetting,
    pub category: Option<Category>, // None plays every predefined category
    pub repeat_policy: RepeatPolicy,
    pub vibration_enabled: bool,
    pub sound_enabled: bool,
}

impl MatchSettings {
    pub fn single_player(timer: TimerSetting, category: Option<Category>) -> Self {
        Self {
            mode: MatchMode::SinglePlayer,
            participant_names: vec!["Player".to_string()],
            rounds_per_participant: 1,
            timer,
            category,
            repeat_policy: RepeatPolicy::PerSession,
            vibration_enabled: true,
            sound_enabled: true,
        }
    }

    pub fn multi_player(
        names: Vec<String>,
        timer: TimerSetting,
        category: Option<Category>,
    ) -> Self {
        Self {
            mode: MatchMode::MultiPlayer,
            participant_names: names,
            ..Self::single_player(timer, category)
        }
    }

    pub fn teams(names: Vec<String>, timer: TimerSetting, category: Option<Category>) -> Self {
        Self {
            mode: MatchMode::Teams,
            ..Self::multi_player(names, timer, category)
        }
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds_per_participant = rounds.max(1);
        self
    }

    pub fn with_repeat_policy(mut self, policy: RepeatPolicy) -> Self {
        self.repeat_policy = policy;
        self
    }

    pub fn is_single_player(&self) -> bool {
        self.mode == MatchMode::SinglePlayer
    }
}
