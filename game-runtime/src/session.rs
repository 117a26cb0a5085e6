use game_core::{
    AngularVelocity, ControllerConfig, GameRoundController, RoundError, RoundEvent,
    RoundEventHandler, RoundResult, ScheduledTick, SeenWordsStore, StatsStore, WordSource,
};
use game_types::{Gesture, MatchSettings, RoundState};
use std::ops::ControlFlow;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::TokioScheduler;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("round session has stopped")]
    Closed,

    #[error(transparent)]
    Round(#[from] RoundError),
}

type Reply<T> = oneshot::Sender<RoundResult<T>>;

/// Everything the session task consumes, in arrival order.
#[derive(Debug)]
pub enum SessionCommand {
    CommitSettings {
        settings: MatchSettings,
        reply: Reply<()>,
    },
    StartMatch {
        reply: Reply<()>,
    },
    NextParticipant {
        reply: Reply<()>,
    },
    FinishTurn {
        reply: Reply<()>,
    },
    Rematch {
        reply: Reply<()>,
    },
    ManualGesture {
        gesture: Gesture,
        reply: Reply<bool>,
    },
    Sample(AngularVelocity),
    Foreground(bool),
    SensorUnavailable,
    ClearSeenWords,
    Elapsed(ScheduledTick),
    Shutdown,
}

/// Pushes controller events out to the presentation channels.
struct ChannelForwarder {
    events: mpsc::UnboundedSender<RoundEvent>,
    state: watch::Sender<RoundState>,
}

impl RoundEventHandler for ChannelForwarder {
    fn handle_event(&mut self, event: RoundEvent) {
        if let RoundEvent::StateChanged { state } = &event {
            self.state.send_replace(state.clone());
        } else {
            debug!("Forwarding {} event", event.name());
        }
        // Nobody listening is fine
        let _ = self.events.send(event);
    }
}

/// Owns a controller on one tokio task. Commands, sensor samples and timer
/// ticks all arrive through a single queue, so the controller never sees two
/// inputs at once.
pub struct RoundSession {
    controller: GameRoundController,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
}

pub struct SpawnedSession {
    pub handle: SessionHandle,
    pub events: mpsc::UnboundedReceiver<RoundEvent>,
    pub task: JoinHandle<()>,
}

impl RoundSession {
    pub fn spawn(
        config: ControllerConfig,
        tick_interval: Duration,
        words: Box<dyn WordSource>,
        stats: Box<dyn StatsStore>,
        seen: Box<dyn SeenWordsStore>,
    ) -> SpawnedSession {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(RoundState::default());

        let scheduler = TokioScheduler::new(&command_tx, tick_interval);
        let mut controller =
            GameRoundController::new(config, Box::new(scheduler), words, stats, seen);
        controller.add_handler(Box::new(ChannelForwarder {
            events: event_tx,
            state: state_tx,
        }));

        let session = RoundSession {
            controller,
            commands: command_rx,
        };
        let task = tokio::spawn(session.run());

        SpawnedSession {
            handle: SessionHandle {
                commands: command_tx,
                state: state_rx,
            },
            events: event_rx,
            task,
        }
    }

    async fn run(mut self) {
        info!("Round session started");
        while let Some(command) = self.commands.recv().await {
            if self.handle_command(command).is_break() {
                break;
            }
        }
        info!("Round session stopped");
    }

    fn handle_command(&mut self, command: SessionCommand) -> ControlFlow<()> {
        let controller = &mut self.controller;
        // Dropped reply receivers mean the caller stopped waiting
        match command {
            SessionCommand::CommitSettings { settings, reply } => {
                let _ = reply.send(controller.commit_settings(settings));
            }
            SessionCommand::StartMatch { reply } => {
                let _ = reply.send(controller.start_match());
            }
            SessionCommand::NextParticipant { reply } => {
                let _ = reply.send(controller.go_to_next_participant_turn());
            }
            SessionCommand::FinishTurn { reply } => {
                let _ = reply.send(controller.finish_turn());
            }
            SessionCommand::Rematch { reply } => {
                let _ = reply.send(controller.reset_for_rematch());
            }
            SessionCommand::ManualGesture { gesture, reply } => {
                let _ = reply.send(controller.manual_gesture(gesture));
            }
            SessionCommand::Sample(reading) => {
                controller.on_sample(reading);
            }
            SessionCommand::Foreground(visible) => controller.set_foreground(visible),
            SessionCommand::SensorUnavailable => controller.report_sensor_unavailable(),
            SessionCommand::ClearSeenWords => controller.clear_seen_words(),
            SessionCommand::Elapsed(tick) => controller.on_tick(tick),
            SessionCommand::Shutdown => {
                debug!("Shutdown requested");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }
}

/// Cheap, cloneable front door to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    state: watch::Receiver<RoundState>,
}

impl SessionHandle {
    pub async fn commit_settings(&self, settings: MatchSettings) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::CommitSettings { settings, reply })
            .await
    }

    pub async fn start_match(&self) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::StartMatch { reply }).await
    }

    pub async fn go_to_next_participant_turn(&self) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::NextParticipant { reply })
            .await
    }

    pub async fn finish_turn(&self) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::FinishTurn { reply }).await
    }

    pub async fn reset_for_rematch(&self) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::Rematch { reply }).await
    }

    pub async fn manual_gesture(&self, gesture: Gesture) -> Result<bool, SessionError> {
        self.request(|reply| SessionCommand::ManualGesture { gesture, reply })
            .await
    }

    pub fn send_sample(&self, reading: AngularVelocity) -> Result<(), SessionError> {
        self.send(SessionCommand::Sample(reading))
    }

    pub fn set_foreground(&self, visible: bool) -> Result<(), SessionError> {
        self.send(SessionCommand::Foreground(visible))
    }

    pub fn report_sensor_unavailable(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::SensorUnavailable)
    }

    pub fn clear_seen_words(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::ClearSeenWords)
    }

    pub fn shutdown(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Shutdown)
    }

    /// Latest published snapshot.
    pub fn state(&self) -> RoundState {
        self.state.borrow().clone()
    }

    pub fn watch_state(&self) -> watch::Receiver<RoundState> {
        self.state.clone()
    }

    fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands.send(command).map_err(|_| SessionError::Closed)
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(Reply<T>) -> SessionCommand,
    ) -> Result<T, SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(command(reply))?;
        let result = response.await.map_err(|_| SessionError::Closed)?;
        Ok(result?)
    }
}
