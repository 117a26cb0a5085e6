use tracing::debug;

/// Identifies one scheduled one-second step of a `RoundClock`.
///
/// Tokens carry the clock epoch they were issued in. Pausing, cancelling or
/// restarting the clock moves to a new epoch, so a token that was already in
/// flight is recognised as stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken {
    epoch: u64,
}

impl TickToken {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    Tick { remaining: u32 },
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
    Paused,
    Unlimited,
    Expired,
}

/// Result of delivering an elapsed second to the clock.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClockStep {
    pub events: Vec<ClockEvent>,
    pub next: Option<TickToken>,
}

impl ClockStep {
    pub fn is_stale(&self) -> bool {
        self.events.is_empty()
    }
}

/// Second-granularity countdown. It does not sleep by itself: every returned
/// `TickToken` must be handed back through `on_elapsed` one second later by
/// whoever drives the event loop.
#[derive(Debug, Clone)]
pub struct RoundClock {
    remaining: i32,
    state: ClockState,
    epoch: u64,
}

impl RoundClock {
    pub fn new() -> Self {
        Self {
            remaining: 0,
            state: ClockState::Stopped,
            epoch: 0,
        }
    }

    /// Starts counting down from `initial_seconds`. A negative value means
    /// unlimited: no tick is ever scheduled and the clock never expires.
    pub fn start(&mut self, initial_seconds: i32) -> Option<TickToken> {
        self.epoch += 1;

        if initial_seconds < 0 {
            self.remaining = game_types::UNLIMITED_TIME;
            self.state = ClockState::Unlimited;
            return None;
        }

        self.remaining = initial_seconds;
        self.state = ClockState::Running;
        Some(self.token())
    }

    pub fn on_elapsed(&mut self, token: TickToken) -> ClockStep {
        if self.state != ClockState::Running || token.epoch != self.epoch {
            debug!("Discarding stale tick from epoch {}", token.epoch);
            return ClockStep::default();
        }

        self.remaining = (self.remaining - 1).max(0);
        let mut events = vec![ClockEvent::Tick {
            remaining: self.remaining as u32,
        }];

        if self.remaining == 0 {
            self.state = ClockState::Expired;
            self.epoch += 1;
            events.push(ClockEvent::Expired);
            return ClockStep { events, next: None };
        }

        ClockStep {
            events,
            next: Some(self.token()),
        }
    }

    /// Stops future ticks and keeps the remaining time. Idempotent.
    pub fn pause(&mut self) {
        if self.state == ClockState::Running {
            self.state = ClockState::Paused;
            self.epoch += 1;
        }
    }

    /// Continues from the paused remaining time. Returns the next tick to
    /// schedule, or `None` when the clock was not paused.
    pub fn resume(&mut self) -> Option<TickToken> {
        if self.state != ClockState::Paused {
            return None;
        }
        self.state = ClockState::Running;
        self.epoch += 1;
        Some(self.token())
    }

    /// Hard stop. Every outstanding token becomes stale.
    pub fn cancel(&mut self) {
        self.epoch += 1;
        self.state = ClockState::Stopped;
    }

    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == ClockState::Paused
    }

    fn token(&self) -> TickToken {
        TickToken { epoch: self.epoch }
    }
}

impl Default for RoundClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs the clock without interruption and collects every event.
    fn run_to_end(clock: &mut RoundClock, mut token: Option<TickToken>) -> Vec<ClockEvent> {
        let mut events = Vec::new();
        while let Some(current) = token {
            let step = clock.on_elapsed(current);
            events.extend(step.events);
            token = step.next;
        }
        events
    }

    #[test]
    fn test_ticks_down_then_expires_once() {
        let mut clock = RoundClock::new();
        let token = clock.start(10);
        let events = run_to_end(&mut clock, token);

        let ticks: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                ClockEvent::Tick { remaining } => Some(*remaining),
                ClockEvent::Expired => None,
            })
            .collect();
        assert_eq!(ticks, vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);

        let expiries = events.iter().filter(|e| **e == ClockEvent::Expired).count();
        assert_eq!(expiries, 1);
        assert_eq!(events.last(), Some(&ClockEvent::Expired));
        assert_eq!(events[events.len() - 2], ClockEvent::Tick { remaining: 0 });
        assert_eq!(clock.state(), ClockState::Expired);
    }

    #[test]
    fn test_unlimited_never_schedules() {
        let mut clock = RoundClock::new();
        assert_eq!(clock.start(-1), None);
        assert_eq!(clock.state(), ClockState::Unlimited);
        assert_eq!(clock.remaining(), -1);

        clock.pause();
        assert_eq!(clock.resume(), None);
        assert_eq!(clock.state(), ClockState::Unlimited);
    }

    #[test]
    fn test_pause_invalidates_pending_tick() {
        let mut clock = RoundClock::new();
        let pending = clock.start(5).unwrap();

        clock.pause();
        let step = clock.on_elapsed(pending);

        assert!(step.is_stale());
        assert_eq!(step.next, None);
        assert_eq!(clock.remaining(), 5);
        assert!(clock.is_paused());
    }

    #[test]
    fn test_pause_is_idempotent_and_resume_continues() {
        let mut clock = RoundClock::new();
        let token = clock.start(3).unwrap();
        let step = clock.on_elapsed(token);
        assert_eq!(step.events, vec![ClockEvent::Tick { remaining: 2 }]);

        clock.pause();
        clock.pause();
        let resumed = clock.resume().unwrap();
        assert_eq!(clock.resume(), None);

        // The token scheduled before the pause must stay dead
        assert!(clock.on_elapsed(step.next.unwrap()).is_stale());

        let events = run_to_end(&mut clock, Some(resumed));
        assert_eq!(
            events,
            vec![
                ClockEvent::Tick { remaining: 1 },
                ClockEvent::Tick { remaining: 0 },
                ClockEvent::Expired,
            ]
        );
    }

    #[test]
    fn test_cancel_is_a_hard_stop() {
        let mut clock = RoundClock::new();
        let token = clock.start(2).unwrap();
        clock.cancel();

        assert!(clock.on_elapsed(token).is_stale());
        assert_eq!(clock.resume(), None);
        assert_eq!(clock.state(), ClockState::Stopped);
    }

    #[test]
    fn test_restart_invalidates_previous_run() {
        let mut clock = RoundClock::new();
        let old = clock.start(10).unwrap();
        let new = clock.start(10).unwrap();

        assert!(clock.on_elapsed(old).is_stale());
        assert!(!clock.on_elapsed(new).is_stale());
    }

    #[test]
    fn test_zero_seconds_expires_on_first_tick() {
        let mut clock = RoundClock::new();
        let token = clock.start(0);
        let events = run_to_end(&mut clock, token);
        assert_eq!(events, vec![ClockEvent::Tick { remaining: 0 }, ClockEvent::Expired]);
    }

    #[test]
    fn test_no_events_after_expiry() {
        let mut clock = RoundClock::new();
        let token = clock.start(1).unwrap();
        clock.on_elapsed(token);
        assert!(clock.on_elapsed(token).is_stale());
    }
}
