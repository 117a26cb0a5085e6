use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;

use crate::RoundError;

/// Result of drawing a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub word: String,
    /// Every word in the pool was excluded; the caller must reset its
    /// exclusion tracking. `word` was drawn from the full pool.
    pub pool_exhausted: bool,
}

/// Picks the next word to show from a pool, skipping excluded words.
pub struct WordCycler {
    rng: StdRng,
}

impl WordCycler {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic draws, for tests and replayable sessions.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next(
        &mut self,
        category: &str,
        pool: &[String],
        excluded: &HashSet<String>,
    ) -> Result<Draw, RoundError> {
        if pool.is_empty() {
            return Err(RoundError::EmptyWordPool {
                category: category.to_string(),
            });
        }

        let available: Vec<&String> = pool.iter().filter(|w| !excluded.contains(*w)).collect();

        if let Some(word) = available.choose(&mut self.rng) {
            return Ok(Draw {
                word: (*word).clone(),
                pool_exhausted: false,
            });
        }

        let word = pool
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| RoundError::EmptyWordPool {
                category: category.to_string(),
            })?;

        Ok(Draw {
            word,
            pool_exhausted: true,
        })
    }
}

impl Default for WordCycler {
    fn default() -> Self {
        Self::new()
    }
}
