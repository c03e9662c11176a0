use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::GameView;
use crate::roster::Player;

/// One of the two competing sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }

    /// The card status a correct guess by this team reveals.
    pub fn color(self) -> CardStatus {
        match self {
            Self::Red => CardStatus::Red,
            Self::Blue => CardStatus::Blue,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Red => write!(f, "RED"),
            Self::Blue => write!(f, "BLUE"),
        }
    }
}

/// What a player does for their team: spymasters see the solution map and
/// give clues, operatives guess cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Spymaster,
    Operative,
}

impl Role {
    pub fn toggled(self) -> Role {
        match self {
            Self::Spymaster => Self::Operative,
            Self::Operative => Self::Spymaster,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spymaster => write!(f, "SPYMASTER"),
            Self::Operative => write!(f, "OPERATIVE"),
        }
    }
}

/// Visible state of a card on the board. Every card starts `Empty` and is
/// mutated at most once, when a guess reveals its true identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardStatus {
    Empty,
    Neutral,
    Red,
    Blue,
    Bomb,
}

impl std::fmt::Display for CardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "EMPTY"),
            Self::Neutral => write!(f, "NEUTRAL"),
            Self::Red => write!(f, "RED"),
            Self::Blue => write!(f, "BLUE"),
            Self::Bomb => write!(f, "BOMB"),
        }
    }
}

/// Messages sent from clients to the server via WebSocket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMsg {
    // Lobby actions
    AddPlayer,
    RemovePlayer { player_id: Uuid },
    SwitchTeam { player_id: Uuid },
    SwitchRole { player_id: Uuid },
    StartGame,

    // Game actions
    SubmitClue { word: String, number: u32 },
    Guess { word: String },
    PauseGame,
}

/// Messages sent from the server to clients via WebSocket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMsg {
    /// Connect reply: the client's reconnect token and its player ids.
    SetId {
        client_id: Uuid,
        players: Vec<Uuid>,
    },
    /// Lobby roster changed. `error_message` is empty when the roster is
    /// ready for a game to start.
    RosterUpdate {
        players: Vec<Player>,
        error_message: String,
    },
    /// Board state changed. The view is tailored per connection: only
    /// spymasters receive the solution map.
    GameUpdate {
        game: GameView,
    },
    GameStarted {
        game_url: String,
    },
    GamePaused,
    GameOver {
        winner: Option<Team>,
    },
    ErrorMessage {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_msg_parses_from_tagged_json() {
        let msg: ClientMsg =
            serde_json::from_str(r#"{"type":"SubmitClue","word":"ocean","number":2}"#).unwrap();
        match msg {
            ClientMsg::SubmitClue { word, number } => {
                assert_eq!(word, "ocean");
                assert_eq!(number, 2);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn enums_serialize_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&Team::Red).unwrap(), r#""RED""#);
        assert_eq!(
            serde_json::to_string(&Role::Spymaster).unwrap(),
            r#""SPYMASTER""#
        );
        assert_eq!(
            serde_json::to_string(&CardStatus::Neutral).unwrap(),
            r#""NEUTRAL""#
        );
    }

    #[test]
    fn team_opponent_and_color() {
        assert_eq!(Team::Red.opponent(), Team::Blue);
        assert_eq!(Team::Blue.opponent(), Team::Red);
        assert_eq!(Team::Red.color(), CardStatus::Red);
        assert_eq!(Team::Blue.color(), CardStatus::Blue);
    }
}
