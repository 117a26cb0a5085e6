use game_core::{SeenWordsStore, StatsStore, StoreResult};
use game_types::{GameResult, GameStatistics};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::storage::{read_json, write_json};
use crate::{StorageError, StorageResult};

/// On-disk layout: match history plus the cross-session seen words.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsSnapshot {
    #[serde(default)]
    games: Vec<GameResult>,
    #[serde(default)]
    seen_words: BTreeSet<String>,
}

/// History and seen words kept in one JSON snapshot file.
///
/// Clones share the file lock, so one clone can be handed to the controller
/// as its `StatsStore` and another as its `SeenWordsStore`.
#[derive(Debug, Clone)]
pub struct JsonStatsRepository {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonStatsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_statistics(&self) -> StorageResult<GameStatistics> {
        let mut games = self.read()?.games;
        games.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(GameStatistics { games })
    }

    fn read(&self) -> StorageResult<StatsSnapshot> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        read_json(&self.path)
    }

    fn update(&self, apply: impl FnOnce(&mut StatsSnapshot)) -> StorageResult<()> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut snapshot: StatsSnapshot = read_json(&self.path)?;
        apply(&mut snapshot);
        write_json(&self.path, &snapshot)
    }
}

impl StatsStore for JsonStatsRepository {
    fn append(&mut self, result: &GameResult) -> StoreResult<()> {
        self.update(|snapshot| snapshot.games.push(result.clone()))?;
        info!("Saved game result {}", result.id);
        Ok(())
    }

    fn load_all(&self) -> StoreResult<Vec<GameResult>> {
        Ok(self.load_statistics()?.games)
    }

    /// Drops the history. Seen words have their own explicit clear.
    fn clear(&mut self) -> StoreResult<()> {
        self.update(|snapshot| snapshot.games.clear())?;
        info!("Cleared game history");
        Ok(())
    }
}

impl SeenWordsStore for JsonStatsRepository {
    fn load(&self) -> StoreResult<HashSet<String>> {
        Ok(self.read()?.seen_words.into_iter().collect())
    }

    fn add_all(&mut self, words: &HashSet<String>) -> StoreResult<()> {
        if words.is_empty() {
            return Ok(());
        }
        self.update(|snapshot| snapshot.seen_words.extend(words.iter().cloned()))?;
        Ok(())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.update(|snapshot| snapshot.seen_words.clear())?;
        info!("Cleared seen words");
        Ok(())
    }
}
