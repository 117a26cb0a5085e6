use game_core::{ScheduledTick, TickScheduler};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use crate::session::SessionCommand;

/// Sleeps on the tokio timer and posts the tick back into the session queue.
///
/// Holds only a weak sender: pending ticks never keep a session alive after
/// every handle is gone.
pub struct TokioScheduler {
    commands: mpsc::WeakUnboundedSender<SessionCommand>,
    interval: Duration,
}

impl TokioScheduler {
    pub fn new(commands: &mpsc::UnboundedSender<SessionCommand>, interval: Duration) -> Self {
        Self {
            commands: commands.downgrade(),
            interval,
        }
    }
}

impl TickScheduler for TokioScheduler {
    fn schedule(&mut self, tick: ScheduledTick) {
        let commands = self.commands.clone();
        let interval = self.interval;

        tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            match commands.upgrade() {
                Some(sender) => {
                    // A closed queue means the session already stopped
                    let _ = sender.send(SessionCommand::Elapsed(tick));
                }
                None => debug!("Dropping {:?} tick, session is gone", tick.timer),
            }
        });
    }
}
