use game_types::{ParticipantId, RoundPhase};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("Category '{category}' has no words")]
    EmptyWordPool { category: String },
    #[error("Cannot {operation} while the round is {phase:?}")]
    InvalidPhase {
        operation: &'static str,
        phase: RoundPhase,
    },
    #[error("A match needs at least one participant")]
    NoParticipants,
    #[error("Participant {0} is not part of this match")]
    UnknownParticipant(ParticipantId),
    #[error("No match settings have been committed")]
    NotConfigured,
}

pub type RoundResult<T> = Result<T, RoundError>;
