use game_types::{GameResult, Gesture, Participant, RoundIssue, RoundState};

/// Everything the presentation layer has to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    StateChanged {
        state: RoundState,
    },
    TurnStarted {
        participant: Participant,
        round: u32,
    },
    WordChanged {
        word: String,
        pool_exhausted: bool,
    },
    GestureRecorded {
        gesture: Gesture,
        word: String,
        score: u32,
        vibrate: bool,
        play_sound: bool,
    },
    NextParticipantReady {
        participant: Participant,
        standings: Vec<Participant>,
    },
    RoundEnded {
        result: GameResult,
        standings: Vec<Participant>,
        persisted: bool,
    },
    Issue(RoundIssue),
}

impl RoundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            RoundEvent::StateChanged { .. } => "state_changed",
            RoundEvent::TurnStarted { .. } => "turn_started",
            RoundEvent::WordChanged { .. } => "word_changed",
            RoundEvent::GestureRecorded { .. } => "gesture_recorded",
            RoundEvent::NextParticipantReady { .. } => "next_participant_ready",
            RoundEvent::RoundEnded { .. } => "round_ended",
            RoundEvent::Issue(_) => "issue",
        }
    }

    /// Terminal events end the current turn or match.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RoundEvent::NextParticipantReady { .. }
                | RoundEvent::RoundEnded { .. }
                | RoundEvent::Issue(RoundIssue::EmptyWordPool { .. })
        )
    }
}

/// Event handler trait for processing round events
pub trait RoundEventHandler: Send {
    fn handle_event(&mut self, event: RoundEvent);
}

/// Simple event bus for distributing round events
pub struct RoundEventBus {
    handlers: Vec<Box<dyn RoundEventHandler>>,
}

impl RoundEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn RoundEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: RoundEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for RoundEventBus {
    fn default() -> Self {
        Self::new()
    }
}
