use anyhow::{Context, Result};
use game_core::{AngularVelocity, RoundEvent};
use game_persistence::{JsonWordRepository, StorageRoot};
use game_runtime::{Config, RoundSession, SessionHandle};
use game_types::{MatchSettings, TimerSetting};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{info, warn};

const SIMULATED_ROUND_SECONDS: u32 = 20;

/// Headless match: participant names come from the command line, gestures
/// from a simulated gyroscope.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    info!("Starting charades simulator with {:?}", config);

    let storage = StorageRoot::open(&config.data_dir)
        .with_context(|| format!("Cannot open data directory {}", config.data_dir.display()))?;
    let stats = storage.stats_repository();
    let words = JsonWordRepository::new(&config.assets_dir);

    let spawned = RoundSession::spawn(
        config.controller_config(),
        config.tick_interval,
        Box::new(words),
        Box::new(stats.clone()),
        Box::new(stats.clone()),
    );
    let handle = spawned.handle;
    let mut events = spawned.events;

    let names: Vec<String> = std::env::args().skip(1).collect();
    let timer = TimerSetting::Limited(SIMULATED_ROUND_SECONDS);
    let settings = if names.len() > 1 {
        MatchSettings::multi_player(names, timer, None)
    } else {
        MatchSettings::single_player(timer, None)
    };

    handle.commit_settings(settings).await?;
    handle.start_match().await?;

    let sensor = tokio::spawn(simulate_sensor(handle.clone(), config.word_seed));

    while let Some(event) = events.recv().await {
        let terminal = event.is_terminal();
        match event {
            RoundEvent::TurnStarted { participant, round } => {
                info!("{} is up (round {})", participant.display_name, round);
            }
            RoundEvent::WordChanged { word, .. } => info!("Act out: {}", word),
            RoundEvent::GestureRecorded { gesture, word, score, .. } => {
                info!("{:?} on '{}', score {}", gesture, word, score);
            }
            RoundEvent::NextParticipantReady { participant, standings } => {
                for p in &standings {
                    info!("  {}: {}", p.display_name, p.accumulated_score);
                }
                info!("Pass the phone to {}", participant.display_name);
                tokio::time::sleep(Duration::from_secs(2)).await;
                handle.go_to_next_participant_turn().await?;
            }
            RoundEvent::RoundEnded { result, standings, persisted } => {
                info!("Match over: {} point(s), saved: {}", result.points(), persisted);
                for p in &standings {
                    info!("  {}: {}", p.display_name, p.accumulated_score);
                }
                break;
            }
            RoundEvent::Issue(issue) => {
                warn!("Round issue: {:?}", issue);
                if terminal {
                    break;
                }
            }
            RoundEvent::StateChanged { .. } => {}
        }
    }

    sensor.abort();
    handle.shutdown()?;
    spawned.task.await?;

    let history = stats.load_statistics()?;
    info!(
        "{} game(s) played, high score {}, average {:.1}",
        history.total_games(),
        history.high_score(),
        history.average_score()
    );
    Ok(())
}

/// Tilts the phone every couple of seconds, mostly forward.
async fn simulate_sensor(handle: SessionHandle, seed: Option<u64>) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    loop {
        let pause = rng.gen_range(1200..3000);
        tokio::time::sleep(Duration::from_millis(pause)).await;

        let tilt = if rng.gen_bool(0.7) { -7.0 } else { 7.0 };
        let samples = [
            AngularVelocity::new(0.0, tilt, 0.0),
            AngularVelocity::new(0.0, 0.0, 0.0),
        ];
        for sample in samples {
            if handle.send_sample(sample).is_err() {
                return;
            }
        }
    }
}
