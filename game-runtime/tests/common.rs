#![allow(dead_code)]

use game_core::{
    AngularVelocity, ControllerConfig, NoSeenWords, RoundEvent, StatsStore, StoreResult,
    WordSource,
};
use game_runtime::{RoundSession, SpawnedSession};
use game_types::{Category, GameResult, MatchSettings, TimerSetting};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

pub struct FixedWords(pub Vec<String>);

impl WordSource for FixedWords {
    fn load_words(&self, category: Option<&Category>) -> Vec<String> {
        match category {
            Some(Category::Custom { words, .. }) => words.clone(),
            _ => self.0.clone(),
        }
    }
}

#[derive(Clone, Default)]
pub struct SharedStats {
    pub results: Arc<Mutex<Vec<GameResult>>>,
}

impl SharedStats {
    pub fn saved(&self) -> Vec<GameResult> {
        self.results.lock().unwrap().clone()
    }
}

impl StatsStore for SharedStats {
    fn append(&mut self, result: &GameResult) -> StoreResult<()> {
        self.results.lock().unwrap().push(result.clone());
        Ok(())
    }

    fn load_all(&self) -> StoreResult<Vec<GameResult>> {
        let mut results = self.saved();
        results.reverse();
        Ok(results)
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.results.lock().unwrap().clear();
        Ok(())
    }
}

/// Spawns a session with one-second ticks and a fixed word pool.
pub fn spawn_session(words: &[&str]) -> (SpawnedSession, SharedStats) {
    let stats = SharedStats::default();
    let config = ControllerConfig {
        rng_seed: Some(7),
        ..ControllerConfig::default()
    };
    let session = RoundSession::spawn(
        config,
        Duration::from_secs(1),
        Box::new(FixedWords(words.iter().map(|w| w.to_string()).collect())),
        Box::new(stats.clone()),
        Box::new(NoSeenWords),
    );
    (session, stats)
}

/// Receives events until one matches, failing if none shows up in time.
pub async fn wait_for(
    events: &mut mpsc::UnboundedReceiver<RoundEvent>,
    check_fn: impl Fn(&RoundEvent) -> bool,
) -> RoundEvent {
    let search = async {
        while let Some(event) = events.recv().await {
            if check_fn(&event) {
                return event;
            }
        }
        panic!("event channel closed before the expected event");
    };
    tokio::time::timeout(Duration::from_secs(600), search)
        .await
        .expect("timed out waiting for event")
}

pub fn is_word_changed(event: &RoundEvent) -> bool {
    matches!(event, RoundEvent::WordChanged { .. })
}

pub fn is_round_ended(event: &RoundEvent) -> bool {
    matches!(event, RoundEvent::RoundEnded { .. })
}

pub fn tilt_forward() -> AngularVelocity {
    AngularVelocity::new(0.0, -6.5, 0.0)
}

pub fn single_player(seconds: u32) -> MatchSettings {
    MatchSettings::single_player(TimerSetting::Limited(seconds), None)
}

pub fn multi_player(names: &[&str], seconds: u32) -> MatchSettings {
    MatchSettings::multi_player(
        names.iter().map(|n| n.to_string()).collect(),
        TimerSetting::Limited(seconds),
        None,
    )
}
