//! Connection to the game server.
//!
//! A transport owns the link for the lifetime of one session: requests are queued
//! without waiting for acknowledgement, and events come back strictly in the order
//! the server sent them. Dropping a transport tears the link down.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use shared::protocol::{ClientRequest, ServerEvent};
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::error::{ClientError, Result};

#[async_trait]
pub trait GameTransport: Send {
    /// Queues `request` for the server and returns immediately.
    fn send(&self, request: ClientRequest) -> Result<()>;

    /// Next event from the server, or `None` once the connection is gone.
    async fn next_event(&mut self) -> Option<ServerEvent>;
}

/// Maps an `http(s)://` server address onto its websocket endpoint.
pub fn websocket_url(server_url: &str) -> Result<Url> {
    let invalid = |reason: &str| ClientError::InvalidServerUrl {
        url: server_url.to_string(),
        reason: reason.to_string(),
    };

    let mut url = Url::parse(server_url.trim()).map_err(|err| invalid(&err.to_string()))?;
    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        _ => return Err(invalid("scheme must be http, https, ws or wss")),
    };
    url.set_scheme(scheme)
        .map_err(|_| invalid("cannot switch to a websocket scheme"))?;

    let path = format!("{}/ws", url.path().trim_end_matches('/'));
    url.set_path(&path);
    Ok(url)
}

pub struct WsTransport {
    outbound: mpsc::UnboundedSender<ClientRequest>,
    inbound: mpsc::UnboundedReceiver<ServerEvent>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl WsTransport {
    pub async fn connect(server_url: &str) -> Result<Self> {
        let url = websocket_url(server_url)?;
        let (stream, _) = connect_async(url.as_str())
            .await
            .map_err(|source| ClientError::Connect {
                url: url.to_string(),
                source,
            })?;
        info!(url = %url, "connected to game server");

        let (mut ws_writer, mut ws_reader) = stream.split();
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<ClientRequest>();
        let (inbound_tx, inbound) = mpsc::unbounded_channel::<ServerEvent>();

        let writer = tokio::spawn(async move {
            while let Some(request) = outbound_rx.recv().await {
                let text = match request.to_json() {
                    Ok(text) => text,
                    Err(err) => {
                        error!(request = request.name(), "failed to encode request: {err}");
                        continue;
                    }
                };
                if let Err(err) = ws_writer.send(Message::Text(text)).await {
                    error!(request = request.name(), "websocket send failed: {err}");
                    break;
                }
                debug!(request = request.name(), "sent request");
            }
            let _ = ws_writer.close().await;
        });

        let reader = tokio::spawn(async move {
            while let Some(frame) = ws_reader.next().await {
                match frame {
                    Ok(Message::Text(text)) => match ServerEvent::from_json(&text) {
                        Ok(event) => {
                            if inbound_tx.send(event).is_err() {
                                break;
                            }
                        }
                        Err(err) => warn!("dropping undecodable server event: {err}"),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(err) => {
                        error!("websocket receive failed: {err}");
                        break;
                    }
                }
            }
            info!("game server connection closed");
        });

        Ok(Self {
            outbound,
            inbound,
            reader,
            writer,
        })
    }
}

#[async_trait]
impl GameTransport for WsTransport {
    fn send(&self, request: ClientRequest) -> Result<()> {
        self.outbound.send(request).map_err(|_| ClientError::Closed)
    }

    async fn next_event(&mut self) -> Option<ServerEvent> {
        self.inbound.recv().await
    }
}

impl Drop for WsTransport {
    fn drop(&mut self) {
        self.reader.abort();
        self.writer.abort();
    }
}

/// In-memory transport. The [`ServerEnd`] plays the game server.
pub struct ChannelTransport {
    outbound: mpsc::UnboundedSender<ClientRequest>,
    inbound: mpsc::UnboundedReceiver<ServerEvent>,
}

pub struct ServerEnd {
    pub requests: mpsc::UnboundedReceiver<ClientRequest>,
    pub events: mpsc::UnboundedSender<ServerEvent>,
}

impl ChannelTransport {
    pub fn pair() -> (Self, ServerEnd) {
        let (outbound, requests) = mpsc::unbounded_channel();
        let (events, inbound) = mpsc::unbounded_channel();
        (Self { outbound, inbound }, ServerEnd { requests, events })
    }
}

#[async_trait]
impl GameTransport for ChannelTransport {
    fn send(&self, request: ClientRequest) -> Result<()> {
        self.outbound.send(request).map_err(|_| ClientError::Closed)
    }

    async fn next_event(&mut self) -> Option<ServerEvent> {
        self.inbound.recv().await
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
