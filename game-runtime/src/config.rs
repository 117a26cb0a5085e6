use anyhow::{Context, Result, bail};
use game_core::{ControllerConfig, DEFAULT_TILT_THRESHOLD};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub tilt_threshold: f32,
    pub tick_interval: Duration,
    pub word_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let tilt_threshold: f32 = parse_or(&lookup, "TILT_THRESHOLD", DEFAULT_TILT_THRESHOLD)?;
        if !tilt_threshold.is_finite() || tilt_threshold <= 0.0 {
            bail!("Invalid TILT_THRESHOLD: must be a positive number");
        }

        let tick_ms: u64 = parse_or(&lookup, "TICK_INTERVAL_MS", 1000)?;
        if tick_ms == 0 {
            bail!("Invalid TICK_INTERVAL_MS: must be greater than zero");
        }

        let word_seed = match lookup("WORD_SEED") {
            Some(raw) => Some(raw.trim().parse().context("Invalid WORD_SEED")?),
            None => None,
        };

        Ok(Self {
            data_dir: lookup("CHARADES_DATA_DIR")
                .unwrap_or_else(|| "./data".to_string())
                .into(),
            assets_dir: lookup("CHARADES_ASSETS_DIR")
                .unwrap_or_else(|| "./assets".to_string())
                .into(),
            tilt_threshold,
            tick_interval: Duration::from_millis(tick_ms),
            word_seed,
        })
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            tilt_threshold: self.tilt_threshold,
            rng_seed: self.word_seed,
            ..ControllerConfig::default()
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", key, raw)),
        None => Ok(default),
    }
}
