use game_types::{
    GameResult, Gesture, MatchSettings, Participant, PlayerScore, RepeatPolicy, RoundIssue,
    RoundPhase, RoundState, category_label,
};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::{
    AngularVelocity, ClockEvent, ControllerConfig, GestureDetector, RoundClock, RoundError,
    RoundEvent, RoundEventBus, RoundEventHandler, RoundResult, ScheduledTick, SeenWordsStore,
    SensorStatus, StatsStore, TickScheduler, TimerKind, TurnContext, TurnCoordinator, WordCycler,
    WordSource,
};

/// Session state machine: countdown, active play, turn resolution.
///
/// Every input (commands, sensor samples, ticks, foreground changes) must be
/// delivered from one logical sequence; the controller is not shared between
/// threads. Stale ticks and gestures are discarded here, so a pause or cancel
/// is a hard barrier regardless of what is still in flight.
pub struct GameRoundController {
    config: ControllerConfig,
    settings: Option<MatchSettings>,
    state: RoundState,
    turns: Option<TurnCoordinator>,
    pool: Vec<String>,
    seen_words: HashSet<String>,
    match_words: HashSet<String>,
    detector: GestureDetector,
    cycler: WordCycler,
    countdown: RoundClock,
    clock: RoundClock,
    foreground: bool,
    last_result: Option<GameResult>,
    scheduler: Box<dyn TickScheduler>,
    words: Box<dyn WordSource>,
    stats: Box<dyn StatsStore>,
    seen: Box<dyn SeenWordsStore>,
    event_bus: RoundEventBus,
}

impl GameRoundController {
    pub fn new(
        config: ControllerConfig,
        scheduler: Box<dyn TickScheduler>,
        words: Box<dyn WordSource>,
        stats: Box<dyn StatsStore>,
        seen: Box<dyn SeenWordsStore>,
    ) -> Self {
        let cycler = match config.rng_seed {
            Some(seed) => WordCycler::with_seed(seed),
            None => WordCycler::new(),
        };

        Self {
            detector: GestureDetector::new(config.tilt_threshold),
            cycler,
            config,
            settings: None,
            state: RoundState::default(),
            turns: None,
            pool: Vec::new(),
            seen_words: HashSet::new(),
            match_words: HashSet::new(),
            countdown: RoundClock::new(),
            clock: RoundClock::new(),
            foreground: true,
            last_result: None,
            scheduler,
            words,
            stats,
            seen,
            event_bus: RoundEventBus::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn RoundEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn settings(&self) -> Option<&MatchSettings> {
        self.settings.as_ref()
    }

    pub fn turns(&self) -> Option<&TurnContext> {
        self.turns.as_ref().map(TurnCoordinator::context)
    }

    pub fn active_participant(&self) -> Option<&Participant> {
        self.turns.as_ref().map(TurnCoordinator::active_participant)
    }

    pub fn standings(&self) -> Vec<Participant> {
        self.turns
            .as_ref()
            .map(TurnCoordinator::standings)
            .unwrap_or_default()
    }

    pub fn last_result(&self) -> Option<&GameResult> {
        self.last_result.as_ref()
    }

    pub fn is_foreground(&self) -> bool {
        self.foreground
    }

    pub fn is_clock_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn sensor_status(&self) -> SensorStatus {
        self.detector.status()
    }

    /// Commits the settings screen: participants, category and timer.
    ///
    /// An empty word pool is reported and rejected so the players can pick
    /// another category; the previous configuration is discarded either way.
    pub fn commit_settings(&mut self, settings: MatchSettings) -> RoundResult<()> {
        self.stop_clocks();
        self.settings = None;
        self.turns = None;
        self.last_result = None;

        let turns = match TurnCoordinator::from_settings(&settings) {
            Ok(turns) => turns,
            Err(err) => {
                warn!("Rejecting settings: {}", err);
                self.replace_state(RoundState::default());
                return Err(err);
            }
        };
        let pool = self.words.load_words(settings.category.as_ref());

        if pool.is_empty() {
            let category = category_name(&settings);
            warn!("Rejecting settings: category '{}' has no words", category);
            self.replace_state(RoundState::default());
            self.event_bus.publish(RoundEvent::Issue(RoundIssue::EmptyWordPool {
                category: category.clone(),
            }));
            return Err(RoundError::EmptyWordPool { category });
        }

        info!(
            "Settings committed: {:?}, {} participant(s), {} words, timer {}s",
            settings.mode,
            turns.context().participants.len(),
            pool.len(),
            settings.timer.as_seconds()
        );

        self.pool = pool;
        self.seen_words = self.load_seen_words(settings.repeat_policy);
        self.match_words.clear();
        self.turns = Some(turns);
        self.replace_state(RoundState::idle(settings.timer.as_seconds()));
        self.settings = Some(settings);
        Ok(())
    }

    /// Starts the first turn of a committed match.
    pub fn start_match(&mut self) -> RoundResult<()> {
        self.start_turn()
    }

    /// Starts the turn of the participant announced by `NextParticipantReady`.
    pub fn go_to_next_participant_turn(&mut self) -> RoundResult<()> {
        self.start_turn()
    }

    fn start_turn(&mut self) -> RoundResult<()> {
        let settings = self.settings.as_ref().ok_or(RoundError::NotConfigured)?;
        if self.state.phase != RoundPhase::Idle {
            return Err(RoundError::InvalidPhase {
                operation: "start a turn",
                phase: self.state.phase,
            });
        }

        let time_remaining = settings.timer.as_seconds();
        let countdown_seconds = self.config.countdown_seconds;

        if let Some(turns) = &self.turns {
            let participant = turns.active_participant().clone();
            info!("Starting turn for {}", participant.display_name);
            self.event_bus.publish(RoundEvent::TurnStarted {
                participant,
                round: turns.context().current_round,
            });
        }

        self.detector.disarm();
        self.replace_state(RoundState {
            score: 0,
            current_word: String::new(),
            time_remaining,
            phase: RoundPhase::Countdown,
            countdown_value: countdown_seconds,
            ..self.state.clone()
        });

        if let Some(token) = self.countdown.start(countdown_seconds as i32) {
            self.scheduler.schedule(ScheduledTick {
                timer: TimerKind::Countdown,
                token,
            });
        }
        Ok(())
    }

    /// Delivers a tick previously handed to the scheduler.
    pub fn on_tick(&mut self, tick: ScheduledTick) {
        match tick.timer {
            TimerKind::Countdown => self.on_countdown_tick(tick),
            TimerKind::Round => self.on_round_tick(tick),
        }
    }

    fn on_countdown_tick(&mut self, tick: ScheduledTick) {
        if self.state.phase != RoundPhase::Countdown {
            return;
        }

        let step = self.countdown.on_elapsed(tick.token);
        for event in step.events {
            match event {
                ClockEvent::Tick { remaining } if remaining > 0 => {
                    self.replace_state(RoundState {
                        countdown_value: remaining as u8,
                        ..self.state.clone()
                    });
                }
                ClockEvent::Tick { .. } => {}
                ClockEvent::Expired => {
                    self.enter_active();
                    return;
                }
            }
        }

        if let Some(token) = step.next {
            self.scheduler.schedule(ScheduledTick {
                timer: TimerKind::Countdown,
                token,
            });
        }
    }

    fn on_round_tick(&mut self, tick: ScheduledTick) {
        if self.state.phase != RoundPhase::Active {
            return;
        }

        let step = self.clock.on_elapsed(tick.token);
        for event in step.events {
            match event {
                ClockEvent::Tick { remaining } => {
                    debug!("{}s remaining", remaining);
                    self.replace_state(RoundState {
                        time_remaining: remaining as i32,
                        ..self.state.clone()
                    });
                }
                ClockEvent::Expired => {
                    info!("Round timer expired");
                    if let Err(err) = self.resolve_turn() {
                        self.halt(&err);
                    }
                    return;
                }
            }
        }

        if let Some(token) = step.next {
            self.scheduler.schedule(ScheduledTick {
                timer: TimerKind::Round,
                token,
            });
        }
    }

    fn enter_active(&mut self) {
        let time_remaining = self.state.time_remaining;
        // Published together with the first word
        self.state = RoundState {
            phase: RoundPhase::Active,
            ..self.state.clone()
        };

        if self.draw_next_word().is_err() {
            return;
        }

        if let Some(token) = self.clock.start(time_remaining) {
            if self.foreground {
                self.scheduler.schedule(ScheduledTick {
                    timer: TimerKind::Round,
                    token,
                });
            } else {
                // Countdown finished while hidden: wait for the foreground
                self.clock.pause();
            }
        }

        if self.foreground {
            self.detector.arm();
        }
        info!("Round active with first word drawn");
    }

    /// Feeds one gyroscope reading. Returns the gesture it triggered, if any.
    pub fn on_sample(&mut self, reading: AngularVelocity) -> Option<Gesture> {
        if self.state.phase != RoundPhase::Active || !self.foreground {
            return None;
        }

        let gesture = self.detector.on_sample(reading)?;
        self.apply_gesture(gesture);
        Some(gesture)
    }

    /// On-screen fallback for devices without a usable gyroscope.
    pub fn manual_gesture(&mut self, gesture: Gesture) -> RoundResult<bool> {
        if self.state.phase != RoundPhase::Active {
            return Err(RoundError::InvalidPhase {
                operation: "record a gesture",
                phase: self.state.phase,
            });
        }
        if !self.foreground {
            return Ok(false);
        }

        match self.detector.trigger(gesture) {
            Some(gesture) => {
                self.apply_gesture(gesture);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn apply_gesture(&mut self, gesture: Gesture) {
        let word = self.state.current_word.clone();
        let score = self.state.score + gesture.points();
        let (vibrate, play_sound) = self
            .settings
            .as_ref()
            .map(|s| (s.vibration_enabled, s.sound_enabled))
            .unwrap_or((false, false));

        debug!("{:?} on '{}', score {}", gesture, word, score);
        self.replace_state(RoundState {
            score,
            ..self.state.clone()
        });
        self.event_bus.publish(RoundEvent::GestureRecorded {
            gesture,
            word,
            score,
            vibrate,
            play_sound,
        });

        if self.draw_next_word().is_ok() {
            self.detector.arm();
        }
    }

    /// Draws the next word and shows it in a single state replacement.
    fn draw_next_word(&mut self) -> RoundResult<()> {
        let category = self
            .settings
            .as_ref()
            .map(category_name)
            .unwrap_or_default();

        let excluded: HashSet<String> = self.state.used_words.union(&self.seen_words).cloned().collect();
        let draw = match self.cycler.next(&category, &self.pool, &excluded) {
            Ok(draw) => draw,
            Err(err) => {
                self.fail_configuration(category);
                return Err(err);
            }
        };

        let mut used_words = if draw.pool_exhausted {
            info!("Word pool exhausted, starting over");
            self.seen_words.clear();
            HashSet::new()
        } else {
            self.state.used_words.clone()
        };
        used_words.insert(draw.word.clone());
        self.match_words.insert(draw.word.clone());

        self.replace_state(RoundState {
            current_word: draw.word.clone(),
            used_words,
            ..self.state.clone()
        });
        self.event_bus.publish(RoundEvent::WordChanged {
            word: draw.word,
            pool_exhausted: draw.pool_exhausted,
        });
        Ok(())
    }

    /// Ends the active turn now, e.g. for an unlimited timer.
    pub fn finish_turn(&mut self) -> RoundResult<()> {
        if self.state.phase != RoundPhase::Active {
            return Err(RoundError::InvalidPhase {
                operation: "finish a turn",
                phase: self.state.phase,
            });
        }
        self.resolve_turn().inspect_err(|err| self.halt(err))
    }

    fn resolve_turn(&mut self) -> RoundResult<()> {
        self.stop_clocks();

        let Some(turns) = self.turns.as_mut() else {
            return Err(RoundError::NotConfigured);
        };

        let participant_id = turns.active_participant().id;
        if let Err(err) = turns.record_turn_score(participant_id, self.state.score) {
            warn!("Could not record turn score: {}", err);
        }

        if turns.is_single_player() {
            return self.end_match();
        }

        let rotation = turns.advance();
        if rotation.match_complete {
            return self.end_match();
        }

        let participant = turns.active_participant().clone();
        let standings = turns.standings();
        self.replace_state(RoundState {
            current_word: String::new(),
            phase: RoundPhase::Idle,
            ..self.state.clone()
        });
        self.event_bus.publish(RoundEvent::NextParticipantReady {
            participant,
            standings,
        });
        Ok(())
    }

    fn end_match(&mut self) -> RoundResult<()> {
        let Some(settings) = self.settings.as_ref() else {
            return Err(RoundError::NotConfigured);
        };
        let category = category_label(settings.category.as_ref());
        let timer_seconds = settings.timer.as_seconds();
        let policy = settings.repeat_policy;

        let result = match &self.turns {
            Some(turns) if !turns.is_single_player() => {
                let players = turns
                    .context()
                    .participants
                    .iter()
                    .map(PlayerScore::from)
                    .collect();
                GameResult::multi_player(players, category, timer_seconds)
            }
            _ => GameResult::single_player(self.state.score, category, timer_seconds),
        };

        let persisted = match self.stats.append(&result) {
            Ok(()) => true,
            Err(err) => {
                warn!("Failed to save game result {}: {}", result.id, err);
                false
            }
        };

        if policy == RepeatPolicy::AcrossSessions {
            if let Err(err) = self.seen.add_all(&self.match_words) {
                warn!("Failed to save seen words: {}", err);
            }
        }

        info!("Match ended with {} point(s)", result.points());
        self.last_result = Some(result.clone());
        self.replace_state(RoundState {
            phase: RoundPhase::Ended,
            ..self.state.clone()
        });
        self.event_bus.publish(RoundEvent::RoundEnded {
            result,
            standings: self.standings(),
            persisted,
        });
        Ok(())
    }

    /// The turn cannot be resolved: end the round rather than stay Active
    /// with its clocks stopped.
    fn halt(&mut self, err: &RoundError) {
        warn!("Ending round, turn could not be resolved: {}", err);
        self.stop_clocks();
        self.replace_state(RoundState {
            phase: RoundPhase::Ended,
            ..self.state.clone()
        });
    }

    fn fail_configuration(&mut self, category: String) {
        warn!("Category '{}' has no words, round cannot continue", category);
        self.stop_clocks();
        self.replace_state(RoundState {
            phase: RoundPhase::Ended,
            ..self.state.clone()
        });
        self.event_bus
            .publish(RoundEvent::Issue(RoundIssue::EmptyWordPool { category }));
    }

    /// App visibility changed. Hiding pauses the round clock and ignores
    /// gestures; showing resumes the clock and re-arms for the visible word.
    /// The phase never changes.
    pub fn set_foreground(&mut self, foreground: bool) {
        if self.foreground == foreground {
            return;
        }
        self.foreground = foreground;

        if !foreground {
            self.detector.disarm();
            if self.state.phase == RoundPhase::Active {
                self.clock.pause();
                info!("Round paused in background");
            }
            return;
        }

        if self.state.phase != RoundPhase::Active {
            return;
        }

        if let Some(token) = self.clock.resume() {
            info!("Round resumed with {}s left", self.clock.remaining());
            self.scheduler.schedule(ScheduledTick {
                timer: TimerKind::Round,
                token,
            });
        }
        self.detector.arm();
    }

    pub fn report_sensor_unavailable(&mut self) {
        if self.detector.mark_unavailable() {
            self.event_bus
                .publish(RoundEvent::Issue(RoundIssue::SensorUnavailable));
        }
    }

    /// Same participants and settings, scores back to zero.
    pub fn reset_for_rematch(&mut self) -> RoundResult<()> {
        let settings = self.settings.as_ref().ok_or(RoundError::NotConfigured)?;
        let time_remaining = settings.timer.as_seconds();
        let policy = settings.repeat_policy;

        self.stop_clocks();
        if let Some(turns) = self.turns.as_mut() {
            turns.reset_for_rematch();
        }
        self.match_words.clear();
        self.seen_words = self.load_seen_words(policy);
        self.last_result = None;
        self.replace_state(RoundState::idle(time_remaining));
        Ok(())
    }

    /// Explicit user action: forget words seen in earlier matches.
    pub fn clear_seen_words(&mut self) {
        if let Err(err) = self.seen.clear() {
            warn!("Failed to clear seen words: {}", err);
        }
        self.seen_words.clear();
    }

    fn load_seen_words(&self, policy: RepeatPolicy) -> HashSet<String> {
        if policy != RepeatPolicy::AcrossSessions {
            return HashSet::new();
        }
        self.seen.load().unwrap_or_else(|err| {
            warn!("Failed to load seen words: {}", err);
            HashSet::new()
        })
    }

    fn stop_clocks(&mut self) {
        self.countdown.cancel();
        self.clock.cancel();
        self.detector.disarm();
    }

    fn replace_state(&mut self, state: RoundState) {
        self.state = state;
        self.event_bus.publish(RoundEvent::StateChanged {
            state: self.state.clone(),
        });
    }
}

fn category_name(settings: &MatchSettings) -> String {
    category_label(settings.category.as_ref())
        .unwrap_or_else(|| game_types::ALL_CATEGORIES_LABEL.to_string())
}
