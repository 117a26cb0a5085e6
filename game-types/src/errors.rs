use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Problems the presentation layer has to surface to the players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundIssue {
    EmptyWordPool { category: String }, // "this category has no words, pick another"
    SensorUnavailable,                  // offer manual correct/skip buttons
}
