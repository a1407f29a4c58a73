//! Round phase state machine for one player's connection.
//!
//! The controller is the only writer of round-scoped view state. Remote events are
//! applied in receipt order; local actions pass through role/phase guards and, when
//! accepted, produce the request to send to the server.

use shared::{
    domain::{
        parse_username, Card, ConnectionId, Phase, Player, Role, Room, RoomId, RoomStatus,
        RoundResult, ScaleValue, ScoreZones, MIN_PLAYERS_TO_START,
    },
    protocol::{ClientRequest, ServerEvent},
};
use tracing::{debug, info, warn};

/// Something the local player did in the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalAction {
    CreateRoom { username: String },
    JoinRoom { room_code: String, username: String },
    StartGame,
    EditClue(String),
    SubmitClue,
    MoveGuess(ScaleValue),
    SubmitGuess,
    Reveal,
}

impl LocalAction {
    pub fn name(&self) -> &'static str {
        match self {
            LocalAction::CreateRoom { .. } => "create_room",
            LocalAction::JoinRoom { .. } => "join_room",
            LocalAction::StartGame => "start_game",
            LocalAction::EditClue(_) => "edit_clue",
            LocalAction::SubmitClue => "submit_clue",
            LocalAction::MoveGuess(_) => "move_guess",
            LocalAction::SubmitGuess => "submit_guess",
            LocalAction::Reveal => "reveal",
        }
    }
}

#[derive(Debug, Clone, Default)]
struct RoundState {
    card: Option<Card>,
    briefer_id: Option<ConnectionId>,
    clue_draft: String,
    shown_clue: String,
    guess: ScaleValue,
    target: Option<ScaleValue>,
    score_zones: Option<ScoreZones>,
    result: Option<RoundResult>,
}

/// Read-only snapshot handed to renderers after every change.
///
/// `target` and `score_zones` are only ever populated for the briefer while
/// choosing a clue.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameView {
    pub local_id: Option<ConnectionId>,
    pub phase: Phase,
    pub role: Role,
    pub room: Option<Room>,
    pub card: Option<Card>,
    pub briefer_id: Option<ConnectionId>,
    pub clue_draft: String,
    pub shown_clue: String,
    pub guess: ScaleValue,
    pub target: Option<ScaleValue>,
    pub score_zones: Option<ScoreZones>,
    pub result: Option<RoundResult>,
    pub last_error: Option<String>,
    pub can_start_game: bool,
    pub can_submit_clue: bool,
    pub can_submit_guess: bool,
    pub can_reveal: bool,
}

impl GameView {
    pub fn players(&self) -> &[Player] {
        self.room
            .as_ref()
            .map(|room| room.players.as_slice())
            .unwrap_or_default()
    }

    pub fn is_local(&self, player: &Player) -> bool {
        self.local_id.as_ref() == Some(&player.id)
    }

    pub fn is_briefer(&self, player: &Player) -> bool {
        self.briefer_id.as_ref() == Some(&player.id)
    }
}

#[derive(Debug, Default)]
pub struct GamePhaseController {
    local_id: Option<ConnectionId>,
    phase: Phase,
    role: Role,
    room: Option<Room>,
    round: RoundState,
    last_error: Option<String>,
}

impl GamePhaseController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn local_id(&self) -> Option<&ConnectionId> {
        self.local_id.as_ref()
    }

    pub fn room(&self) -> Option<&Room> {
        self.room.as_ref()
    }

    pub fn view(&self) -> GameView {
        let briefer_sees_dial = self.briefer_choosing_clue();
        GameView {
            local_id: self.local_id.clone(),
            phase: self.phase,
            role: self.role,
            room: self.room.clone(),
            card: self.round.card.clone(),
            briefer_id: self.round.briefer_id.clone(),
            clue_draft: self.round.clue_draft.clone(),
            shown_clue: self.round.shown_clue.clone(),
            guess: self.round.guess,
            target: self.round.target.filter(|_| briefer_sees_dial),
            score_zones: self
                .round
                .score_zones
                .clone()
                .filter(|_| briefer_sees_dial),
            result: self.round.result.clone(),
            last_error: self.last_error.clone(),
            can_start_game: self.can_start_game(),
            can_submit_clue: briefer_sees_dial,
            can_submit_guess: self.guesser_guessing(),
            can_reveal: self.can_reveal(),
        }
    }

    /// Runs a local action through its guard. `None` means nothing should be sent,
    /// either because the action is local-only or because the guard rejected it.
    pub fn handle(&mut self, action: LocalAction) -> Option<ClientRequest> {
        let name = action.name();
        let request = match action {
            LocalAction::CreateRoom { username } => self.create_room(&username),
            LocalAction::JoinRoom {
                room_code,
                username,
            } => self.join_room(&room_code, &username),
            LocalAction::StartGame => self.start_game(),
            LocalAction::EditClue(text) => {
                self.edit_clue(text);
                None
            }
            LocalAction::SubmitClue => self.submit_clue(),
            LocalAction::MoveGuess(value) => {
                self.move_guess(value);
                None
            }
            LocalAction::SubmitGuess => self.submit_guess(),
            LocalAction::Reveal => self.reveal(),
        };
        if let Some(request) = &request {
            self.last_error = None;
            info!(
                action = name,
                request = request.name(),
                phase = %self.phase,
                role = %self.role,
                "local action accepted"
            );
        }
        request
    }

    /// Moves to `waiting` straight away; a server error before any room arrives
    /// drops back to `lobby` so the player can try again.
    pub fn create_room(&mut self, username: &str) -> Option<ClientRequest> {
        if self.phase != Phase::Lobby {
            return self.reject("create_room");
        }
        let Ok(username) = parse_username(username) else {
            return self.reject("create_room");
        };
        self.phase = Phase::Waiting;
        Some(ClientRequest::CreateRoom { username })
    }

    pub fn join_room(&mut self, room_code: &str, username: &str) -> Option<ClientRequest> {
        if self.phase != Phase::Lobby {
            return self.reject("join_room");
        }
        let (Ok(room_id), Ok(username)) = (RoomId::parse(room_code), parse_username(username))
        else {
            return self.reject("join_room");
        };
        self.phase = Phase::Waiting;
        Some(ClientRequest::JoinRoom { room_id, username })
    }

    pub fn start_game(&mut self) -> Option<ClientRequest> {
        if !self.can_start_game() {
            return self.reject("start_game");
        }
        let room_id = self.room.as_ref()?.room_id.clone();
        Some(ClientRequest::StartGame { room_id })
    }

    /// Updates the briefer's clue text box.
    pub fn edit_clue(&mut self, text: String) -> bool {
        if !self.briefer_choosing_clue() {
            self.reject("edit_clue");
            return false;
        }
        self.round.clue_draft = text;
        true
    }

    pub fn submit_clue(&mut self) -> Option<ClientRequest> {
        let clue = self.round.clue_draft.trim();
        if !self.briefer_choosing_clue() || clue.is_empty() {
            return self.reject("submit_clue");
        }
        let clue = clue.to_string();
        let room_id = self.room.as_ref()?.room_id.clone();
        self.phase = Phase::Guessing;
        Some(ClientRequest::SendClue { room_id, clue })
    }

    /// Moves the guess pointer. Only a guesser may move it, and only while guessing.
    pub fn move_guess(&mut self, value: ScaleValue) -> bool {
        if !self.guesser_guessing() {
            self.reject("move_guess");
            return false;
        }
        self.round.guess = value;
        true
    }

    pub fn submit_guess(&mut self) -> Option<ClientRequest> {
        if !self.guesser_guessing() {
            return self.reject("submit_guess");
        }
        let room_id = self.room.as_ref()?.room_id.clone();
        self.phase = Phase::Revealing;
        Some(ClientRequest::SendGuess {
            room_id,
            guess_value: self.round.guess,
        })
    }

    pub fn reveal(&mut self) -> Option<ClientRequest> {
        if !self.can_reveal() {
            return self.reject("reveal");
        }
        let room_id = self.room.as_ref()?.room_id.clone();
        Some(ClientRequest::RevealAnswer { room_id })
    }

    /// Applies one server event. Events are authoritative and are applied whatever
    /// the current phase is.
    pub fn apply(&mut self, event: ServerEvent) {
        let name = event.name();
        let before = self.phase;

        match event {
            ServerEvent::Connected { connection_id } => {
                self.local_id = Some(connection_id);
            }
            ServerEvent::RoomCreated { room_id, players } => {
                info!(room_id = %room_id, players = players.len(), "room created");
                self.last_error = None;
                self.room = Some(Room { room_id, players });
                self.phase = Phase::Waiting;
            }
            ServerEvent::RoomJoined {
                room_id,
                players,
                game_state,
            } => {
                info!(
                    room_id = %room_id,
                    players = players.len(),
                    status = ?game_state,
                    "joined room"
                );
                self.last_error = None;
                self.room = Some(Room { room_id, players });
                self.phase = match game_state {
                    RoomStatus::Waiting => Phase::Waiting,
                    RoomStatus::InProgress => Phase::Guessing,
                };
            }
            ServerEvent::PlayerJoined { players } | ServerEvent::PlayerLeft { players } => {
                self.replace_roster(players);
            }
            ServerEvent::NewRound {
                card,
                briefer_id,
                players,
            } => {
                self.reset_round();
                self.last_error = None;
                self.role = Role::for_round(&briefer_id, self.local_id.as_ref());
                self.round.card = Some(card);
                self.round.briefer_id = Some(briefer_id);
                self.replace_roster(players);
                self.phase = match self.role {
                    Role::Briefer => Phase::ChoosingClue,
                    Role::Guesser => Phase::Guessing,
                };
            }
            ServerEvent::YourTurnToClue {
                card,
                target_value,
                score_zones,
            } => {
                if self.phase != Phase::ChoosingClue {
                    self.reset_round();
                }
                self.role = Role::Briefer;
                self.round.briefer_id = self.local_id.clone();
                self.round.card = Some(card);
                self.round.target = Some(target_value);
                self.round.score_zones = Some(score_zones);
                self.phase = Phase::ChoosingClue;
            }
            ServerEvent::ClueGiven { clue, card } => {
                self.round.shown_clue = clue;
                self.round.card = Some(card);
                self.phase = Phase::Guessing;
            }
            ServerEvent::YourTurnToGuess => {
                self.phase = Phase::Guessing;
            }
            ServerEvent::GuessSubmitted { guess_value } => {
                self.round.guess = guess_value;
                self.phase = Phase::Revealing;
            }
            ServerEvent::YourTurnToReveal => {
                self.phase = Phase::Revealing;
            }
            ServerEvent::RoundResult(result) => {
                self.replace_roster(result.total_scores.clone());
                self.round.result = Some(result);
                self.phase = Phase::Revealing;
            }
            ServerEvent::Error(err) => {
                warn!(event = name, phase = %self.phase, "server reported error: {}", err.message);
                self.last_error = Some(err.message);
                if self.phase == Phase::Waiting && self.room.is_none() {
                    self.phase = Phase::Lobby;
                }
            }
        }

        if before != self.phase {
            info!(
                event = name,
                from = %before,
                to = %self.phase,
                role = %self.role,
                "phase changed"
            );
        } else {
            debug!(event = name, phase = %self.phase, "applied server event");
        }
    }

    // Field order matters: nothing from the previous round may outlive this call.
    fn reset_round(&mut self) {
        self.round.clue_draft.clear();
        self.round.shown_clue.clear();
        self.round.guess = ScaleValue::MIDPOINT;
        self.round.target = None;
        self.round.score_zones = None;
        self.round.result = None;
    }

    fn replace_roster(&mut self, players: Vec<Player>) {
        match self.room.as_mut() {
            Some(room) => room.players = players,
            None => debug!("roster update received before any room; ignoring"),
        }
    }

    fn briefer_choosing_clue(&self) -> bool {
        matches!((self.role, self.phase), (Role::Briefer, Phase::ChoosingClue))
    }

    fn guesser_guessing(&self) -> bool {
        matches!((self.role, self.phase), (Role::Guesser, Phase::Guessing))
    }

    fn can_reveal(&self) -> bool {
        matches!((self.role, self.phase), (Role::Briefer, Phase::Revealing))
            && self.round.result.is_none()
    }

    fn can_start_game(&self) -> bool {
        let Some(room) = self.room.as_ref() else {
            return false;
        };
        self.phase == Phase::Waiting
            && room.players.len() >= MIN_PLAYERS_TO_START
            && room.host().map(|host| &host.id) == self.local_id.as_ref()
            && self.local_id.is_some()
    }

    fn reject(&self, action: &'static str) -> Option<ClientRequest> {
        debug!(
            action,
            phase = %self.phase,
            role = %self.role,
            "local action rejected by guard"
        );
        None
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
