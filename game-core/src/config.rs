use game_types::COUNTDOWN_START;

use crate::DEFAULT_TILT_THRESHOLD;

/// Tunables for a `GameRoundController`.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    pub tilt_threshold: f32,   // rad/s on the tilt axis
    pub countdown_seconds: u8, // length of the pre-play countdown
    pub rng_seed: Option<u64>, // fixed seed for reproducible word order
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tilt_threshold: DEFAULT_TILT_THRESHOLD,
            countdown_seconds: COUNTDOWN_START,
            rng_seed: None,
        }
    }
}
