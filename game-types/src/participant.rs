use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

pub type ParticipantId = Uuid;

/// A player (or a team) taking turns on the shared device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    pub accumulated_score: u32,
}

impl Participant {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            accumulated_score: 0,
        }
    }
}

/// Final (name, score) pair stored in a multi-player result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerScore {
    pub name: String,
    pub score: u32,
}

impl From<&Participant> for PlayerScore {
    fn from(participant: &Participant) -> Self {
        PlayerScore {
            name: participant.display_name.clone(),
            score: participant.accumulated_score,
        }
    }
}
