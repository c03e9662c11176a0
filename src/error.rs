use uuid::Uuid;

use crate::room::Lifecycle;

/// Errors surfaced by the game core. All of them are recovered at the room
/// boundary and reported to the originating connection; none abort the room
/// task or leave partial state behind.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("card index {0} is out of bounds")]
    InvalidIndex(usize),

    #[error("card counts must sum to {expected} and include at least one bomb")]
    InvalidConfiguration { expected: usize },

    #[error("clue word cannot be empty")]
    InvalidClue,

    #[error("a clue can only be submitted during a spymaster turn")]
    IllegalPhase,

    #[error("no clue has been given yet")]
    NoActiveClue,

    #[error("no guesses remaining for the current clue")]
    NoGuessesRemaining,

    #[error("no unrevealed card matches the word {0:?}")]
    UnknownWord(String),

    #[error("player {0} not found")]
    PlayerNotFound(Uuid),

    #[error("client {0} not found")]
    ClientNotFound(Uuid),

    #[error("client {client} does not control player {player}")]
    NotPlayerOwner { client: Uuid, player: Uuid },

    #[error("the lobby is locked, no new players may join")]
    LobbyLocked,

    #[error("{action} is not allowed while the room is in {state}")]
    WrongLifecycle {
        action: &'static str,
        state: Lifecycle,
    },

    #[error("all avatars are in use")]
    AvatarPoolExhausted,

    #[error("the word source cannot supply {wanted} distinct words (has {available})")]
    InsufficientWords { wanted: usize, available: usize },
}

/// Coarse classification used for logging and reporting policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Permission,
    NotFound,
    ResourceExhausted,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIndex(_)
            | Self::InvalidConfiguration { .. }
            | Self::InvalidClue
            | Self::IllegalPhase
            | Self::NoActiveClue
            | Self::NoGuessesRemaining
            | Self::UnknownWord(_) => ErrorKind::Validation,
            Self::NotPlayerOwner { .. } | Self::LobbyLocked | Self::WrongLifecycle { .. } => {
                ErrorKind::Permission
            }
            Self::PlayerNotFound(_) | Self::ClientNotFound(_) => ErrorKind::NotFound,
            Self::AvatarPoolExhausted | Self::InsufficientWords { .. } => {
                ErrorKind::ResourceExhausted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_their_reporting_class() {
        assert_eq!(GameError::IllegalPhase.kind(), ErrorKind::Validation);
        assert_eq!(GameError::LobbyLocked.kind(), ErrorKind::Permission);
        assert_eq!(
            GameError::PlayerNotFound(uuid::Uuid::new_v4()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            GameError::AvatarPoolExhausted.kind(),
            ErrorKind::ResourceExhausted
        );
    }
}

