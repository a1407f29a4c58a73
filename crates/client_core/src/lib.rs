//! Player-side core of the dial guessing game: the round phase controller, the
//! dial scene it feeds, and the connection that drives it.

use tokio::sync::watch;

pub mod controller;
pub mod error;
pub mod scene;
pub mod session;
pub mod transport;

pub use controller::{GamePhaseController, GameView, LocalAction};
pub use error::ClientError;
pub use scene::{DialScene, Needle, NeedleKind};
pub use session::GameSession;
pub use transport::{ChannelTransport, GameTransport, ServerEnd, WsTransport};

/// Opens a websocket to `server_url` and wraps it in a ready-to-run session.
pub async fn connect(
    server_url: &str,
) -> error::Result<(GameSession<WsTransport>, watch::Receiver<GameView>)> {
    let transport = WsTransport::connect(server_url).await?;
    Ok(GameSession::new(transport))
}
