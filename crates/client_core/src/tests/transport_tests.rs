use std::time::Duration;

use axum::{
    extract::ws::{Message as AxumMessage, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
    Router,
};
use shared::domain::{ConnectionId, Player, RoomId};
use tokio::{net::TcpListener, time::timeout};

use super::*;

#[test]
fn http_urls_become_websocket_endpoints() {
    assert_eq!(
        websocket_url("http://localhost:3000").expect("url").as_str(),
        "ws://localhost:3000/ws"
    );
    assert_eq!(
        websocket_url("https://dial.example.com/game/").expect("url").as_str(),
        "wss://dial.example.com/game/ws"
    );
    assert_eq!(
        websocket_url("ws://127.0.0.1:9000").expect("url").as_str(),
        "ws://127.0.0.1:9000/ws"
    );
}

#[test]
fn rejects_unusable_server_urls() {
    assert!(matches!(
        websocket_url("ftp://dial.example.com"),
        Err(ClientError::InvalidServerUrl { .. })
    ));
    assert!(matches!(
        websocket_url("not a url"),
        Err(ClientError::InvalidServerUrl { .. })
    ));
}

#[tokio::test]
async fn channel_transport_delivers_in_order() {
    let (mut transport, mut server) = ChannelTransport::pair();
    for event in [ServerEvent::YourTurnToGuess, ServerEvent::YourTurnToReveal] {
        server.events.send(event).expect("send");
    }
    assert_eq!(transport.next_event().await, Some(ServerEvent::YourTurnToGuess));
    assert_eq!(transport.next_event().await, Some(ServerEvent::YourTurnToReveal));

    transport
        .send(ClientRequest::CreateRoom {
            username: "alice".into(),
        })
        .expect("queue");
    assert!(matches!(
        server.requests.recv().await,
        Some(ClientRequest::CreateRoom { .. })
    ));

    drop(server);
    assert_eq!(transport.next_event().await, None);
    assert!(matches!(
        transport.send(ClientRequest::CreateRoom {
            username: "alice".into()
        }),
        Err(ClientError::Closed)
    ));
}

async fn ws_handler(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(fake_game_server)
}

async fn fake_game_server(mut socket: WebSocket) {
    let greeting = ServerEvent::Connected {
        connection_id: ConnectionId("conn-1".into()),
    };
    let frames = [
        "definitely not json".to_string(),
        serde_json::to_string(&greeting).expect("encode"),
    ];
    for frame in frames {
        if socket.send(AxumMessage::Text(frame)).await.is_err() {
            return;
        }
    }

    while let Some(Ok(AxumMessage::Text(text))) = socket.recv().await {
        let request: ClientRequest = serde_json::from_str(&text).expect("client request");
        let ClientRequest::CreateRoom { username } = request else {
            continue;
        };
        let reply = ServerEvent::RoomCreated {
            room_id: RoomId("AB12".into()),
            players: vec![Player {
                id: ConnectionId("conn-1".into()),
                username,
                score: 0,
            }],
        };
        let reply = serde_json::to_string(&reply).expect("encode");
        if socket.send(AxumMessage::Text(reply)).await.is_err() {
            return;
        }
    }
}

#[tokio::test]
async fn websocket_transport_round_trips_with_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/ws", get(ws_handler));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    let mut transport = WsTransport::connect(&format!("http://{addr}"))
        .await
        .expect("connect");

    let first = timeout(Duration::from_secs(5), transport.next_event())
        .await
        .expect("greeting in time");
    assert_eq!(
        first,
        Some(ServerEvent::Connected {
            connection_id: ConnectionId("conn-1".into())
        })
    );

    transport
        .send(ClientRequest::CreateRoom {
            username: "alice".into(),
        })
        .expect("queue");
    let reply = timeout(Duration::from_secs(5), transport.next_event())
        .await
        .expect("reply in time");
    match reply {
        Some(ServerEvent::RoomCreated { room_id, players }) => {
            assert_eq!(room_id.as_str(), "AB12");
            assert_eq!(players[0].username, "alice");
        }
        other => panic!("expected room_created, got {other:?}"),
    }
}

#[tokio::test]
async fn connecting_to_nothing_fails_cleanly() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let result = WsTransport::connect(&format!("http://{addr}")).await;
    assert!(matches!(result, Err(ClientError::Connect { .. })));
}
