use tokio::sync::{mpsc, watch};
use tracing::info;

use crate::{
    controller::{GameView, GamePhaseController, LocalAction},
    error::Result,
    transport::GameTransport,
};

/// One player's connection-scoped game state and its event loop.
///
/// Every inbound event and local action is handled to completion before the next
/// one is looked at, and a fresh [`GameView`] is published after each of them.
pub struct GameSession<T: GameTransport> {
    controller: GamePhaseController,
    transport: T,
    views: watch::Sender<GameView>,
}

impl<T: GameTransport> GameSession<T> {
    pub fn new(transport: T) -> (Self, watch::Receiver<GameView>) {
        let controller = GamePhaseController::new();
        let (views, view_rx) = watch::channel(controller.view());
        (
            Self {
                controller,
                transport,
                views,
            },
            view_rx,
        )
    }

    /// Runs until the server hangs up or `actions` is closed. All game state is
    /// dropped with the session.
    pub async fn run(mut self, mut actions: mpsc::Receiver<LocalAction>) -> Result<()> {
        loop {
            tokio::select! {
                event = self.transport.next_event() => {
                    let Some(event) = event else {
                        info!("server connection ended; discarding game state");
                        break;
                    };
                    self.controller.apply(event);
                }
                action = actions.recv() => {
                    let Some(action) = action else {
                        info!("local input closed; leaving game");
                        break;
                    };
                    if let Some(request) = self.controller.handle(action) {
                        self.transport.send(request)?;
                    }
                }
            }
            self.views.send_replace(self.controller.view());
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
