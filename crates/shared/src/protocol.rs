use serde::{Deserialize, Serialize};

use crate::{
    domain::{Card, ConnectionId, Player, RoomId, RoomStatus, RoundResult, ScaleValue, ScoreZones},
    error::ServerError,
};

/// Actions the client asks the game server to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientRequest {
    CreateRoom {
        username: String,
    },
    JoinRoom {
        room_id: RoomId,
        username: String,
    },
    StartGame {
        room_id: RoomId,
    },
    SendClue {
        room_id: RoomId,
        clue: String,
    },
    SendGuess {
        room_id: RoomId,
        guess_value: ScaleValue,
    },
    RevealAnswer {
        room_id: RoomId,
    },
}

impl ClientRequest {
    pub fn name(&self) -> &'static str {
        match self {
            ClientRequest::CreateRoom { .. } => "create_room",
            ClientRequest::JoinRoom { .. } => "join_room",
            ClientRequest::StartGame { .. } => "start_game",
            ClientRequest::SendClue { .. } => "send_clue",
            ClientRequest::SendGuess { .. } => "send_guess",
            ClientRequest::RevealAnswer { .. } => "reveal_answer",
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Everything the game server pushes to a connected client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerEvent {
    Connected {
        connection_id: ConnectionId,
    },
    RoomCreated {
        room_id: RoomId,
        players: Vec<Player>,
    },
    RoomJoined {
        room_id: RoomId,
        players: Vec<Player>,
        #[serde(default)]
        game_state: RoomStatus,
    },
    PlayerJoined {
        players: Vec<Player>,
    },
    PlayerLeft {
        players: Vec<Player>,
    },
    NewRound {
        card: Card,
        briefer_id: ConnectionId,
        players: Vec<Player>,
    },
    YourTurnToClue {
        card: Card,
        target_value: ScaleValue,
        score_zones: ScoreZones,
    },
    ClueGiven {
        clue: String,
        card: Card,
    },
    YourTurnToGuess,
    GuessSubmitted {
        guess_value: ScaleValue,
    },
    YourTurnToReveal,
    RoundResult(RoundResult),
    Error(ServerError),
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Connected { .. } => "connected",
            ServerEvent::RoomCreated { .. } => "room_created",
            ServerEvent::RoomJoined { .. } => "room_joined",
            ServerEvent::PlayerJoined { .. } => "player_joined",
            ServerEvent::PlayerLeft { .. } => "player_left",
            ServerEvent::NewRound { .. } => "new_round",
            ServerEvent::YourTurnToClue { .. } => "your_turn_to_clue",
            ServerEvent::ClueGiven { .. } => "clue_given",
            ServerEvent::YourTurnToGuess => "your_turn_to_guess",
            ServerEvent::GuessSubmitted { .. } => "guess_submitted",
            ServerEvent::YourTurnToReveal => "your_turn_to_reveal",
            ServerEvent::RoundResult(_) => "round_result",
            ServerEvent::Error(_) => "error",
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
