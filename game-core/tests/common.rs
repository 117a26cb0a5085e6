#![allow(dead_code)]

use game_core::{
    AngularVelocity, ControllerConfig, GameRoundController, ManualScheduler, NoSeenWords,
    RoundEvent, RoundEventHandler, SeenWordsStore, StatsStore, StoreError, StoreResult,
    WordSource,
};
use game_types::{Category, GameResult, MatchSettings, RoundPhase, TimerSetting};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Word source backed by a fixed list, ignoring the category.
pub struct FixedWords(pub Vec<String>);

impl WordSource for FixedWords {
    fn load_words(&self, category: Option<&Category>) -> Vec<String> {
        match category {
            Some(Category::Custom { words, .. }) => words.clone(),
            _ => self.0.clone(),
        }
    }
}

/// In-memory stats store that can be inspected after the controller took ownership.
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

/// Stats store whose disk is always full.
pub struct BrokenStats;

impl StatsStore for BrokenStats {
    fn append(&mut self, _result: &GameResult) -> StoreResult<()> {
        Err(StoreError::Io(std::io::Error::other("disk full")))
    }

    fn load_all(&self) -> StoreResult<Vec<GameResult>> {
        Err(StoreError::Json("truncated file".to_string()))
    }

    fn clear(&mut self) -> StoreResult<()> {
        Err(StoreError::LockPoisoned)
    }
}

#[derive(Clone, Default)]
pub struct SharedSeenWords {
    pub words: Arc<Mutex<HashSet<String>>>,
}

impl SeenWordsStore for SharedSeenWords {
    fn load(&self) -> StoreResult<HashSet<String>> {
        Ok(self.words.lock().unwrap().clone())
    }

    fn add_all(&mut self, words: &HashSet<String>) -> StoreResult<()> {
        self.words.lock().unwrap().extend(words.iter().cloned());
        Ok(())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.words.lock().unwrap().clear();
        Ok(())
    }
}

/// Event collector for testing event emissions
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<RoundEvent>>>,
}

impl EventCollector {
    pub fn get_events(&self) -> Vec<RoundEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn count(&self, check_fn: impl Fn(&RoundEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| check_fn(e)).count()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&RoundEvent) -> bool) -> bool {
        self.count(check_fn) > 0
    }
}

impl RoundEventHandler for EventCollector {
    fn handle_event(&mut self, event: RoundEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub struct Harness {
    pub controller: GameRoundController,
    pub scheduler: ManualScheduler,
    pub stats: SharedStats,
    pub seen: SharedSeenWords,
    pub events: EventCollector,
}

impl Harness {
    pub fn new(words: &[&str]) -> Self {
        Self::build(words, None, None)
    }

    pub fn with_seen_words(words: &[&str], seen: SharedSeenWords) -> Self {
        Self::build(words, None, Some(seen))
    }

    pub fn with_broken_stats(words: &[&str]) -> Self {
        Self::build(words, Some(Box::new(BrokenStats)), None)
    }

    fn build(
        words: &[&str],
        stats_override: Option<Box<dyn StatsStore>>,
        seen: Option<SharedSeenWords>,
    ) -> Self {
        let scheduler = ManualScheduler::new();
        let stats = SharedStats::default();
        let events = EventCollector::default();
        let words = FixedWords(words.iter().map(|w| w.to_string()).collect());

        let stats_store: Box<dyn StatsStore> = match stats_override {
            Some(store) => store,
            None => Box::new(stats.clone()),
        };
        let seen_store: Box<dyn SeenWordsStore> = match &seen {
            Some(seen) => Box::new(seen.clone()),
            None => Box::new(NoSeenWords),
        };

        let config = ControllerConfig {
            rng_seed: Some(42),
            ..ControllerConfig::default()
        };
        let mut controller = GameRoundController::new(
            config,
            Box::new(scheduler.clone()),
            Box::new(words),
            stats_store,
            seen_store,
        );
        controller.add_handler(Box::new(events.clone()));

        Self {
            controller,
            scheduler,
            stats,
            seen: seen.unwrap_or_default(),
            events,
        }
    }

    /// Delivers the next `n` scheduled ticks, as if `n` seconds passed.
    pub fn advance(&mut self, n: usize) {
        for _ in 0..n {
            let tick = self
                .scheduler
                .pop()
                .expect("a tick should have been scheduled");
            self.controller.on_tick(tick);
        }
    }

    /// Runs the 3-2-1 countdown so the round becomes active.
    pub fn finish_countdown(&mut self) {
        self.advance(3);
        assert_eq!(self.controller.state().phase, RoundPhase::Active);
    }

    pub fn tilt_forward(&mut self) {
        self.controller.on_sample(AngularVelocity::new(0.0, -6.5, 0.0));
    }

    pub fn tilt_backward(&mut self) {
        self.controller.on_sample(AngularVelocity::new(0.0, 6.5, 0.0));
    }
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
