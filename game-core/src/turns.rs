use game_types::{MatchMode, MatchSettings, Participant, ParticipantId, PlayerScore};
use tracing::info;

use crate::{RoundError, RoundResult};

/// Who plays, in which order, and what they have scored so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnContext {
    pub mode: MatchMode,
    pub participants: Vec<Participant>,
    pub active_index: usize,
    pub rounds_per_participant: u32,
    pub current_round: u32, // 1-based
}

/// Outcome of passing the device to the next participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    pub next_index: usize,
    pub wrapped: bool,
    pub match_complete: bool,
}

pub struct TurnCoordinator {
    context: TurnContext,
}

impl TurnCoordinator {
    pub fn new(mode: MatchMode, names: &[String], rounds_per_participant: u32) -> RoundResult<Self> {
        let names: Vec<&String> = match mode {
            MatchMode::SinglePlayer => names.iter().take(1).collect(),
            MatchMode::MultiPlayer | MatchMode::Teams => names.iter().collect(),
        };

        if names.is_empty() {
            return Err(RoundError::NoParticipants);
        }

        let participants = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = name.trim();
                if name.is_empty() {
                    Participant::new(format!("Player {}", i + 1))
                } else {
                    Participant::new(name)
                }
            })
            .collect();

        Ok(Self {
            context: TurnContext {
                mode,
                participants,
                active_index: 0,
                rounds_per_participant: rounds_per_participant.max(1),
                current_round: 1,
            },
        })
    }

    pub fn from_settings(settings: &MatchSettings) -> RoundResult<Self> {
        Self::new(
            settings.mode,
            &settings.participant_names,
            settings.rounds_per_participant,
        )
    }

    pub fn context(&self) -> &TurnContext {
        &self.context
    }

    pub fn is_single_player(&self) -> bool {
        self.context.mode == MatchMode::SinglePlayer
    }

    pub fn active_participant(&self) -> &Participant {
        &self.context.participants[self.context.active_index]
    }

    pub fn record_turn_score(&mut self, participant_id: ParticipantId, delta: u32) -> RoundResult<()> {
        if !self.context.participants.iter().any(|p| p.id == participant_id) {
            return Err(RoundError::UnknownParticipant(participant_id));
        }

        let participants = self
            .context
            .participants
            .iter()
            .map(|p| {
                if p.id == participant_id {
                    Participant {
                        accumulated_score: p.accumulated_score.saturating_add(delta),
                        ..p.clone()
                    }
                } else {
                    p.clone()
                }
            })
            .collect();

        self.context = TurnContext {
            participants,
            ..self.context.clone()
        };
        Ok(())
    }

    /// Rotates to the next participant. The match is complete when the
    /// rotation wraps back to the first participant on the last round.
    pub fn advance(&mut self) -> Rotation {
        let count = self.context.participants.len();
        let next_index = (self.context.active_index + 1) % count;
        let wrapped = next_index == 0;
        let match_complete = wrapped && self.context.current_round >= self.context.rounds_per_participant;
        let current_round = if wrapped {
            self.context.current_round + 1
        } else {
            self.context.current_round
        };

        self.context = TurnContext {
            active_index: next_index,
            current_round,
            ..self.context.clone()
        };

        info!(
            "Turn passed to {} (round {}, wrapped: {}, complete: {})",
            self.active_participant().display_name,
            current_round,
            wrapped,
            match_complete
        );

        Rotation {
            next_index,
            wrapped,
            match_complete,
        }
    }

    pub fn reset_for_rematch(&mut self) {
        let participants = self
            .context
            .participants
            .iter()
            .map(|p| Participant {
                accumulated_score: 0,
                ..p.clone()
            })
            .collect();

        self.context = TurnContext {
            participants,
            active_index: 0,
            current_round: 1,
            ..self.context.clone()
        };
    }

    /// Participants by descending score; ties keep join order.
    pub fn standings(&self) -> Vec<Participant> {
        let mut standings = self.context.participants.clone();
        standings.sort_by(|a, b| b.accumulated_score.cmp(&a.accumulated_score));
        standings
    }

    pub fn final_scores(&self) -> Vec<PlayerScore> {
        self.standings().iter().map(PlayerScore::from).collect()
    }
}
