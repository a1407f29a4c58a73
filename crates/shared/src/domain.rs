use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Fewest players a room needs before its host may start the game.
pub const MIN_PLAYERS_TO_START: usize = 2;
/// Room capacity as advertised in the waiting room. The server enforces it.
pub const MAX_PLAYERS: usize = 5;

macro_rules! string_id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id_newtype!(ConnectionId);
string_id_newtype!(RoomId);

impl RoomId {
    /// Normalizes a user-typed room code: surrounding whitespace is dropped and
    /// the code is uppercased, so `" ab12 "` and `"AB12"` name the same room.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let code = raw.trim();
        if code.is_empty() {
            return Err(DomainError::EmptyRoomCode);
        }
        Ok(Self(code.to_uppercase()))
    }
}

/// Trims a user-typed display name; blank names are refused.
pub fn parse_username(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::EmptyUsername);
    }
    Ok(name.to_string())
}

/// A position on the 0..=100 dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct ScaleValue(u8);

impl ScaleValue {
    pub const MIN: ScaleValue = ScaleValue(0);
    pub const MIDPOINT: ScaleValue = ScaleValue(50);
    pub const MAX: ScaleValue = ScaleValue(100);

    pub fn new(value: i64) -> Result<Self, DomainError> {
        if (0..=100).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DomainError::ScaleValueOutOfRange(value))
        }
    }

    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for ScaleValue {
    fn default() -> Self {
        Self::MIDPOINT
    }
}

impl TryFrom<i64> for ScaleValue {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScaleValue> for u8 {
    fn from(value: ScaleValue) -> Self {
        value.0
    }
}

impl fmt::Display for ScaleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: ConnectionId,
    pub username: String,
    #[serde(default)]
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub room_id: RoomId,
    pub players: Vec<Player>,
}

impl Room {
    /// The first-listed player created the room and is the only one allowed to start it.
    pub fn host(&self) -> Option<&Player> {
        self.players.first()
    }
}

/// The two opposing concepts anchoring the 0 and 100 ends of the dial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneTier {
    Zone1,
    Zone2,
    Zone3,
    Zone4,
}

impl ZoneTier {
    pub const ALL: [ZoneTier; 4] = [
        ZoneTier::Zone1,
        ZoneTier::Zone2,
        ZoneTier::Zone3,
        ZoneTier::Zone4,
    ];
}

/// Dial positions grouped by scoring tier. Only the briefer receives these.
///
/// The server is expected to keep the tiers disjoint; nothing here checks it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreZones {
    #[serde(default)]
    pub zone1: Vec<ScaleValue>,
    #[serde(default)]
    pub zone2: Vec<ScaleValue>,
    #[serde(default)]
    pub zone3: Vec<ScaleValue>,
    #[serde(default)]
    pub zone4: Vec<ScaleValue>,
}

impl ScoreZones {
    pub fn tier(&self, tier: ZoneTier) -> &[ScaleValue] {
        match tier {
            ZoneTier::Zone1 => &self.zone1,
            ZoneTier::Zone2 => &self.zone2,
            ZoneTier::Zone3 => &self.zone3,
            ZoneTier::Zone4 => &self.zone4,
        }
    }

    pub fn tiers(&self) -> impl Iterator<Item = (ZoneTier, &[ScaleValue])> + '_ {
        ZoneTier::ALL.into_iter().map(|tier| (tier, self.tier(tier)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub target_value: ScaleValue,
    pub score_this_round: u32,
    pub total_scores: Vec<Player>,
}

impl RoundResult {
    pub fn score_badge(&self) -> String {
        format!("+{}", self.score_this_round)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Lobby,
    Waiting,
    ChoosingClue,
    Guessing,
    Revealing,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Lobby => "lobby",
            Phase::Waiting => "waiting",
            Phase::ChoosingClue => "choosing_clue",
            Phase::Guessing => "guessing",
            Phase::Revealing => "revealing",
        }
    }

    /// Phases in which the dial is on screen.
    pub fn is_in_round(self) -> bool {
        matches!(
            self,
            Phase::ChoosingClue | Phase::Guessing | Phase::Revealing
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Briefer,
    #[default]
    Guesser,
}

impl Role {
    pub fn for_round(briefer_id: &ConnectionId, local_id: Option<&ConnectionId>) -> Self {
        if local_id == Some(briefer_id) {
            Role::Briefer
        } else {
            Role::Guesser
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Briefer => "briefer",
            Role::Guesser => "guesser",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Room state reported to a player joining an existing room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    #[default]
    Waiting,
    InProgress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_code_is_trimmed_and_uppercased() {
        assert_eq!(RoomId::parse(" ab12 ").expect("room").as_str(), "AB12");
        assert!(matches!(
            RoomId::parse("   "),
            Err(DomainError::EmptyRoomCode)
        ));
    }

    #[test]
    fn username_is_trimmed_and_must_not_be_blank() {
        assert_eq!(parse_username("  alice ").expect("name"), "alice");
        assert_eq!(parse_username(" \t "), Err(DomainError::EmptyUsername));
    }

    #[test]
    fn scale_value_rejects_out_of_range() {
        assert_eq!(ScaleValue::new(73).expect("value").get(), 73);
        assert!(ScaleValue::new(101).is_err());
        assert!(ScaleValue::new(-1).is_err());
        assert_eq!(ScaleValue::clamped(140), ScaleValue::MAX);
        assert_eq!(ScaleValue::clamped(-3), ScaleValue::MIN);
    }

    #[test]
    fn scale_value_decodes_from_bare_integer() {
        let value: ScaleValue = serde_json::from_str("42").expect("decode");
        assert_eq!(value.get(), 42);
        assert!(serde_json::from_str::<ScaleValue>("150").is_err());
        assert_eq!(serde_json::to_string(&value).expect("encode"), "42");
    }

    #[test]
    fn missing_score_defaults_to_zero() {
        let player: Player =
            serde_json::from_str(r#"{"id":"abc","username":"alice"}"#).expect("player");
        assert_eq!(player.score, 0);
    }

    #[test]
    fn role_follows_briefer_id() {
        let me = ConnectionId("me".into());
        let other = ConnectionId("other".into());
        assert_eq!(Role::for_round(&me, Some(&me)), Role::Briefer);
        assert_eq!(Role::for_round(&other, Some(&me)), Role::Guesser);
        assert_eq!(Role::for_round(&me, None), Role::Guesser);
    }

    #[test]
    fn score_zone_tiers_come_back_in_order() {
        let zones = ScoreZones {
            zone1: vec![ScaleValue::MIDPOINT],
            ..ScoreZones::default()
        };
        let tiers: Vec<_> = zones.tiers().map(|(tier, points)| (tier, points.len())).collect();
        assert_eq!(
            tiers,
            vec![
                (ZoneTier::Zone1, 1),
                (ZoneTier::Zone2, 0),
                (ZoneTier::Zone3, 0),
                (ZoneTier::Zone4, 0),
            ]
        );
    }
}
