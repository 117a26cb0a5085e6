use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::{ALL_CATEGORIES_LABEL, PlayerScore, UNLIMITED_TIME};

/// Outcome of a finished match, appended to the statistics history.
///
/// Exactly one of `score` (single-player) or `players` (multi-player) is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameResult {
    pub id: Uuid,
    pub timestamp: i64, // Milliseconds since the Unix epoch
    pub category: Option<String>, // None means "all categories"
    pub timer_seconds: i32,       // UNLIMITED_TIME for no limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub players: Option<Vec<PlayerScore>>,
}

impl GameResult {
    pub fn single_player(score: u32, category: Option<String>, timer_seconds: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now().timestamp_millis(),
            category,
            timer_seconds,
            score: Some(score),
            players: None,
        }
    }

    pub fn multi_player(
        players: Vec<PlayerScore>,
        category: Option<String>,
        timer_seconds: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now().timestamp_millis(),
            category,
            timer_seconds,
            score: None,
            players: Some(players),
        }
    }

    /// Headline points: the flat score, or the best participant's score.
    pub fn points(&self) -> u32 {
        match (&self.score, &self.players) {
            (Some(score), _) => *score,
            (None, Some(players)) => players.iter().map(|p| p.score).max().unwrap_or(0),
            (None, None) => 0,
        }
    }

    pub fn is_multi_player(&self) -> bool {
        self.players.is_some()
    }

    pub fn played_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    pub fn formatted_date(&self) -> String {
        self.played_at()
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }

    pub fn category_display(&self) -> &str {
        self.category.as_deref().unwrap_or(ALL_CATEGORIES_LABEL)
    }

    pub fn timer_display(&self) -> String {
        if self.timer_seconds == UNLIMITED_TIME {
            "∞".to_string()
        } else {
            format!("{}s", self.timer_seconds)
        }
    }
}

/// Read-only projections over the stored history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameStatistics {
    pub games: Vec<GameResult>,
}

impl GameStatistics {
    pub fn new(games: Vec<GameResult>) -> Self {
        Self { games }
    }

    pub fn total_games(&self) -> usize {
        self.games.len()
    }

    pub fn average_score(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        self.total_points() as f64 / self.games.len() as f64
    }

    pub fn high_score(&self) -> u32 {
        self.games.iter().map(GameResult::points).max().unwrap_or(0)
    }

    pub fn total_points(&self) -> u64 {
        self.games.iter().map(|g| g.points() as u64).sum()
    }

    /// Newest games first.
    pub fn recent_games(&self, limit: usize) -> Vec<GameResult> {
        let mut games = self.games.clone();
        games.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        games.truncate(limit);
        games
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_at(score: u32, timestamp: i64) -> GameResult {
        GameResult {
            timestamp,
            ..GameResult::single_player(score, None, 60)
        }
    }

    #[test]
    fn test_single_player_result() {
        let result = GameResult::single_player(7, Some("Animals".to_string()), 5);
        assert_eq!(result.points(), 7);
        assert!(!result.is_multi_player());
        assert_eq!(result.category_display(), "Animals");
        assert_eq!(result.timer_display(), "5s");
    }

    #[test]
    fn test_multi_player_result() {
        let players = vec![
            PlayerScore { name: "Ana".to_string(), score: 3 },
            PlayerScore { name: "Ben".to_string(), score: 5 },
        ];
        let result = GameResult::multi_player(players, None, UNLIMITED_TIME);
        assert!(result.is_multi_player());
        assert_eq!(result.points(), 5);
        assert_eq!(result.category_display(), ALL_CATEGORIES_LABEL);
        assert_eq!(result.timer_display(), "∞");
    }

    #[test]
    fn test_result_json_schema() {
        let result = GameResult::single_player(2, None, 5);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["score"], 2);
        assert_eq!(json["timerSeconds"], 5);
        assert!(json.get("timer_seconds").is_none());
        assert!(json["category"].is_null());
        assert!(json.get("players").is_none());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{
            "id": "6f1c1f3e-4f6b-4d55-9a56-1c0f6f0c0a11",
            "timestamp": 1700000000000,
            "category": null,
            "timerSeconds": 30,
            "score": 4,
            "streak": 2
        }"#;
        let result: GameResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.score, Some(4));
        assert_eq!(result.players, None);
    }

    #[test]
    fn test_statistics_projections() {
        let stats = GameStatistics::new(vec![result_at(2, 10), result_at(6, 30), result_at(4, 20)]);

        assert_eq!(stats.total_games(), 3);
        assert_eq!(stats.high_score(), 6);
        assert_eq!(stats.total_points(), 12);
        assert!((stats.average_score() - 4.0).abs() < f64::EPSILON);

        let recent = stats.recent_games(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].timestamp, 30);
        assert_eq!(recent[1].timestamp, 20);
    }

    #[test]
    fn test_empty_statistics() {
        let stats = GameStatistics::default();
        assert_eq!(stats.average_score(), 0.0);
        assert_eq!(stats.high_score(), 0);
    }
}
