use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use rand::Rng;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

use crate::config::GameConfig;
use crate::engine::Game;
use crate::error::GameError;
use crate::roster::RosterManager;
use crate::types::{Role, ServerMsg, Team};
use crate::words::WordSource;

/// Where a room is in its life: gathering players, playing, or showing the
/// final board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Lobby,
    InGame,
    EndScreen,
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lobby => write!(f, "LOBBY"),
            Self::InGame => write!(f, "IN_GAME"),
            Self::EndScreen => write!(f, "ENDSCREEN"),
        }
    }
}

/// Commands the WebSocket handler sends to a room task. One variant per
/// inbound event; the match in [`Room::apply`] is exhaustive, so no event
/// can be silently dropped.
#[derive(Debug, Clone)]
pub enum RoomCommand {
    Connect {
        socket_id: Uuid,
        token: Option<Uuid>,
    },
    AddPlayer {
        socket_id: Uuid,
    },
    RemovePlayer {
        socket_id: Uuid,
        player_id: Uuid,
    },
    SwitchTeam {
        socket_id: Uuid,
        player_id: Uuid,
    },
    SwitchRole {
        socket_id: Uuid,
        player_id: Uuid,
    },
    StartGame {
        socket_id: Uuid,
    },
    SubmitClue {
        socket_id: Uuid,
        word: String,
        number: u32,
    },
    Guess {
        socket_id: Uuid,
        word: String,
    },
    PauseGame {
        socket_id: Uuid,
    },
    Disconnect {
        socket_id: Uuid,
    },
}

impl RoomCommand {
    fn socket_id(&self) -> Uuid {
        match self {
            Self::Connect { socket_id, .. }
            | Self::AddPlayer { socket_id }
            | Self::RemovePlayer { socket_id, .. }
            | Self::SwitchTeam { socket_id, .. }
            | Self::SwitchRole { socket_id, .. }
            | Self::StartGame { socket_id }
            | Self::SubmitClue { socket_id, .. }
            | Self::Guess { socket_id, .. }
            | Self::PauseGame { socket_id }
            | Self::Disconnect { socket_id } => *socket_id,
        }
    }
}

/// Notifications a room produces for the transport layer to dispatch. The
/// room never talks to a socket itself.
#[derive(Debug, Clone)]
pub enum RoomEvent {
    /// Send a message to a specific socket.
    SendTo { socket_id: Uuid, msg: ServerMsg },
    /// Broadcast a message to all sockets in the room.
    Broadcast { msg: ServerMsg },
}

/// One room: a roster and (while playing) a game, driven through a
/// lobby/game/endscreen lifecycle. All mutations go through [`Room::apply`]
/// on the owning task, so room state is never touched concurrently.
pub struct Room {
    code: String,
    lifecycle: Lifecycle,
    roster: RosterManager,
    game: Option<Game>,
    /// socket id -> client id, for every live connection in the room.
    connections: HashMap<Uuid, Uuid>,
    config: GameConfig,
    words: Arc<dyn WordSource>,
}

impl Room {
    pub fn new(code: String, config: GameConfig, words: Arc<dyn WordSource>) -> Self {
        let roster = RosterManager::new(config.avatars.clone());
        Self {
            code,
            lifecycle: Lifecycle::Lobby,
            roster,
            game: None,
            connections: HashMap::new(),
            config,
            words,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// True once every connection has left. Used by the room task to decide
    /// when a finished room can be reaped.
    pub fn is_deserted(&self) -> bool {
        self.connections.is_empty()
    }

    /// Applies one command and returns the notifications it produced.
    /// Failures never mutate state; they surface as an error message to the
    /// originating connection only.
    pub fn apply(&mut self, cmd: RoomCommand) -> Vec<RoomEvent> {
        let socket_id = cmd.socket_id();
        let result = match cmd {
            RoomCommand::Connect { socket_id, token } => self.on_connect(socket_id, token),
            RoomCommand::AddPlayer { socket_id } => self.on_add_player(socket_id),
            RoomCommand::RemovePlayer {
                socket_id,
                player_id,
            } => self.on_remove_player(socket_id, player_id),
            RoomCommand::SwitchTeam {
                socket_id,
                player_id,
            } => self.on_switch_team(socket_id, player_id),
            RoomCommand::SwitchRole {
                socket_id,
                player_id,
            } => self.on_switch_role(socket_id, player_id),
            RoomCommand::StartGame { socket_id } => self.on_start_game(socket_id),
            RoomCommand::SubmitClue {
                socket_id,
                word,
                number,
            } => self.on_submit_clue(socket_id, word, number),
            RoomCommand::Guess { socket_id, word } => self.on_guess(socket_id, word),
            RoomCommand::PauseGame { socket_id } => self.on_pause_game(socket_id),
            RoomCommand::Disconnect { socket_id } => self.on_disconnect(socket_id),
        };

        match result {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(
                    "Room {}: rejected event ({:?}): {}",
                    self.code,
                    err.kind(),
                    err
                );
                vec![self.error_to(socket_id, &err)]
            }
        }
    }

    fn on_connect(
        &mut self,
        socket_id: Uuid,
        token: Option<Uuid>,
    ) -> Result<Vec<RoomEvent>, GameError> {
        let (client_id, players) = self
            .roster
            .connect(token)
            .map(|client| (client.id, client.player_ids()))?;
        self.connections.insert(socket_id, client_id);

        let mut events = vec![
            RoomEvent::SendTo {
                socket_id,
                msg: ServerMsg::SetId { client_id, players },
            },
            self.roster_update(),
        ];
        // A reconnect mid-game catches the board up immediately.
        if let Some(game) = self.game.as_ref() {
            events.push(RoomEvent::SendTo {
                socket_id,
                msg: ServerMsg::GameUpdate {
                    game: game.serialize(self.view_role(client_id)),
                },
            });
        }
        Ok(events)
    }

    fn on_add_player(&mut self, socket_id: Uuid) -> Result<Vec<RoomEvent>, GameError> {
        self.require(Lifecycle::Lobby, "adding a player")?;
        let client_id = self.resolve_client(socket_id)?;
        self.roster.add_player(client_id)?;
        Ok(vec![self.cookie_refresh(socket_id, client_id), self.roster_update()])
    }

    fn on_remove_player(
        &mut self,
        socket_id: Uuid,
        player_id: Uuid,
    ) -> Result<Vec<RoomEvent>, GameError> {
        self.require(Lifecycle::Lobby, "removing a player")?;
        let client_id = self.resolve_client(socket_id)?;
        self.roster.remove_player(client_id, player_id)?;
        Ok(vec![self.cookie_refresh(socket_id, client_id), self.roster_update()])
    }

    fn on_switch_team(
        &mut self,
        socket_id: Uuid,
        player_id: Uuid,
    ) -> Result<Vec<RoomEvent>, GameError> {
        self.require(Lifecycle::Lobby, "switching teams")?;
        let client_id = self.resolve_client(socket_id)?;
        self.roster.switch_team(client_id, player_id)?;
        Ok(vec![self.roster_update()])
    }

    fn on_switch_role(
        &mut self,
        socket_id: Uuid,
        player_id: Uuid,
    ) -> Result<Vec<RoomEvent>, GameError> {
        self.require(Lifecycle::Lobby, "switching roles")?;
        let client_id = self.resolve_client(socket_id)?;
        self.roster.switch_role(client_id, player_id)?;
        Ok(vec![self.roster_update()])
    }

    fn on_start_game(&mut self, socket_id: Uuid) -> Result<Vec<RoomEvent>, GameError> {
        self.require(Lifecycle::Lobby, "starting the game")?;
        self.resolve_client(socket_id)?;

        if let Some(error) = self.roster.validate() {
            return Ok(vec![
                RoomEvent::SendTo {
                    socket_id,
                    msg: ServerMsg::ErrorMessage {
                        message: error.message().to_string(),
                    },
                },
                self.roster_update(),
            ]);
        }

        let game = Game::start(self.words.as_ref(), &self.config)?;
        self.game = Some(game);
        self.lifecycle = Lifecycle::InGame;
        self.roster.set_locked(true);
        tracing::info!("Room {}: game started", self.code);

        let mut events = vec![RoomEvent::Broadcast {
            msg: ServerMsg::GameStarted {
                game_url: format!("/g/{}", self.code),
            },
        }];
        events.extend(self.game_updates());
        Ok(events)
    }

    fn on_submit_clue(
        &mut self,
        socket_id: Uuid,
        word: String,
        number: u32,
    ) -> Result<Vec<RoomEvent>, GameError> {
        self.require(Lifecycle::InGame, "submitting a clue")?;
        self.resolve_client(socket_id)?;
        self.game_mut("submitting a clue")?.submit_clue(&word, number)?;
        Ok(self.game_updates())
    }

    fn on_guess(&mut self, socket_id: Uuid, word: String) -> Result<Vec<RoomEvent>, GameError> {
        self.require(Lifecycle::InGame, "guessing")?;
        self.resolve_client(socket_id)?;
        let game = self.game_mut("guessing")?;
        let team = game.current_turn().0;
        let result = game.guess(&word)?;
        let game_over = game.is_game_over();
        let winner = game.winner();

        let mut events = self.game_updates();
        if game_over {
            self.lifecycle = Lifecycle::EndScreen;
            events.push(RoomEvent::Broadcast {
                msg: ServerMsg::GameOver { winner },
            });
            tracing::info!("Room {}: game over, winner {:?}", self.code, winner);
        } else {
            tracing::debug!(
                "Room {}: {} guessed {:?}, revealed {} ({})",
                self.code,
                team,
                word,
                result.status,
                if result.correct { "correct" } else { "incorrect" },
            );
        }
        Ok(events)
    }

    fn on_pause_game(&mut self, socket_id: Uuid) -> Result<Vec<RoomEvent>, GameError> {
        self.require(Lifecycle::InGame, "pausing the game")?;
        self.resolve_client(socket_id)?;
        self.game = None;
        self.lifecycle = Lifecycle::Lobby;
        self.roster.set_locked(false);
        tracing::info!("Room {}: game paused, back to lobby", self.code);
        Ok(vec![
            RoomEvent::Broadcast {
                msg: ServerMsg::GamePaused,
            },
            self.roster_update(),
        ])
    }

    /// Disconnects are best-effort: an unknown socket is a silent no-op.
    /// The client dangles with its players and avatars reserved.
    fn on_disconnect(&mut self, socket_id: Uuid) -> Result<Vec<RoomEvent>, GameError> {
        let Some(client_id) = self.connections.remove(&socket_id) else {
            return Ok(Vec::new());
        };
        let still_connected = self.connections.values().any(|id| *id == client_id);
        if !still_connected {
            self.roster.disconnect(client_id);
        }
        Ok(vec![self.roster_update()])
    }

    fn require(&self, expected: Lifecycle, action: &'static str) -> Result<(), GameError> {
        if self.lifecycle == expected {
            Ok(())
        } else {
            Err(GameError::WrongLifecycle {
                action,
                state: self.lifecycle,
            })
        }
    }

    fn resolve_client(&self, socket_id: Uuid) -> Result<Uuid, GameError> {
        self.connections
            .get(&socket_id)
            .copied()
            .ok_or(GameError::ClientNotFound(socket_id))
    }

    fn game_mut(&mut self, action: &'static str) -> Result<&mut Game, GameError> {
        let state = self.lifecycle;
        self.game
            .as_mut()
            .ok_or(GameError::WrongLifecycle { action, state })
    }

    /// A client sees the spymaster view if any of its players is one.
    fn view_role(&self, client_id: Uuid) -> Role {
        self.roster
            .client(client_id)
            .map(|client| {
                if client.has_role(Team::Red, Role::Spymaster)
                    || client.has_role(Team::Blue, Role::Spymaster)
                {
                    Role::Spymaster
                } else {
                    Role::Operative
                }
            })
            .unwrap_or(Role::Operative)
    }

    fn roster_update(&self) -> RoomEvent {
        let players = self.roster.players().cloned().collect();
        let error_message = self
            .roster
            .validate()
            .map(|error| error.message().to_string())
            .unwrap_or_default();
        RoomEvent::Broadcast {
            msg: ServerMsg::RosterUpdate {
                players,
                error_message,
            },
        }
    }

    /// One role-tailored board snapshot per connection. Broadcasting a
    /// single view would leak the solution map to operatives.
    fn game_updates(&self) -> Vec<RoomEvent> {
        let Some(game) = self.game.as_ref() else {
            return Vec::new();
        };
        self.connections
            .iter()
            .map(|(socket_id, client_id)| RoomEvent::SendTo {
                socket_id: *socket_id,
                msg: ServerMsg::GameUpdate {
                    game: game.serialize(self.view_role(*client_id)),
                },
            })
            .collect()
    }

    fn cookie_refresh(&self, socket_id: Uuid, client_id: Uuid) -> RoomEvent {
        let players = self
            .roster
            .client(client_id)
            .map(|client| client.player_ids())
            .unwrap_or_default();
        RoomEvent::SendTo {
            socket_id,
            msg: ServerMsg::SetId { client_id, players },
        }
    }

    fn error_to(&self, socket_id: Uuid, err: &GameError) -> RoomEvent {
        RoomEvent::SendTo {
            socket_id,
            msg: ServerMsg::ErrorMessage {
                message: err.to_string(),
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }
}

/// Registry holds all active rooms.
pub struct Registry {
    /// room code -> handle
    rooms: DashMap<String, RoomHandle>,
    config: GameConfig,
    words: Arc<dyn WordSource>,
}

#[derive(Clone)]
pub struct RoomHandle {
    pub code: String,
    pub cmd_tx: mpsc::Sender<RoomCommand>,
    pub event_tx: broadcast::Sender<RoomEvent>,
}

impl Registry {
    pub fn new(config: GameConfig, words: Arc<dyn WordSource>) -> Arc<Self> {
        Arc::new(Self {
            rooms: DashMap::new(),
            config,
            words,
        })
    }

    /// Creates a room under a fresh code and spawns its task.
    pub fn create_room(self: &Arc<Self>) -> RoomHandle {
        let code = self.unique_code();
        let (cmd_tx, cmd_rx) = mpsc::channel(256);
        let (event_tx, _) = broadcast::channel(256);

        let handle = RoomHandle {
            code: code.clone(),
            cmd_tx,
            event_tx: event_tx.clone(),
        };
        self.rooms.insert(code.clone(), handle.clone());

        let room = Room::new(code, self.config.clone(), Arc::clone(&self.words));
        let registry = Arc::clone(self);
        tokio::spawn(room_task(room, cmd_rx, event_tx, registry));

        tracing::info!("Room created: {}", handle.code);
        handle
    }

    pub fn room(&self, code: &str) -> Option<RoomHandle> {
        self.rooms.get(code).map(|handle| handle.clone())
    }

    pub fn remove_room(&self, code: &str) {
        self.rooms.remove(code);
    }

    /// Rejection-samples codes until one is free.
    fn unique_code(&self) -> String {
        loop {
            let code = generate_room_code(self.config.game_code_len);
            if !self.rooms.contains_key(&code) {
                return code;
            }
        }
    }
}

fn generate_room_code(len: usize) -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Owns one room for its whole life: applies commands in arrival order and
/// fans resulting notifications out to the room's event channel.
async fn room_task(
    mut room: Room,
    mut cmd_rx: mpsc::Receiver<RoomCommand>,
    event_tx: broadcast::Sender<RoomEvent>,
    registry: Arc<Registry>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        for event in room.apply(cmd) {
            let _ = event_tx.send(event);
        }
        // Reap the room once the game has finished and everyone has left.
        if room.lifecycle() == Lifecycle::EndScreen && room.is_deserted() {
            break;
        }
    }
    registry.remove_room(room.code());
    tracing::info!("Room {} task ended", room.code());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::BuiltinWords;

    fn room() -> Room {
        Room::new(
            "abcde".to_string(),
            GameConfig::default(),
            Arc::new(BuiltinWords),
        )
    }

    fn connect(room: &mut Room) -> (Uuid, Uuid) {
        let socket_id = Uuid::new_v4();
        let events = room.apply(RoomCommand::Connect {
            socket_id,
            token: None,
        });
        (socket_id, client_id_of(&events))
    }

    fn client_id_of(events: &[RoomEvent]) -> Uuid {
        events
            .iter()
            .find_map(|event| match event {
                RoomEvent::SendTo {
                    msg: ServerMsg::SetId { client_id, .. },
                    ..
                } => Some(*client_id),
                _ => None,
            })
            .expect("no SetId event")
    }

    fn error_of(events: &[RoomEvent]) -> Option<&str> {
        events.iter().find_map(|event| match event {
            RoomEvent::SendTo {
                msg: ServerMsg::ErrorMessage { message },
                ..
            } => Some(message.as_str()),
            _ => None,
        })
    }

    fn view_for(events: &[RoomEvent], socket: Uuid) -> Option<&crate::engine::GameView> {
        events.iter().find_map(|event| match event {
            RoomEvent::SendTo {
                socket_id,
                msg: ServerMsg::GameUpdate { game },
            } if *socket_id == socket => Some(game),
            _ => None,
        })
    }

    /// Fills the lobby with a valid roster: one spymaster client per team
    /// and one client running both operatives.
    fn seat_valid_roster(room: &mut Room) -> (Uuid, Uuid, Uuid) {
        let (red_spymaster, _) = connect(room);
        let (blue_spymaster, _) = connect(room);
        let (operatives, _) = connect(room);
        for socket_id in [red_spymaster, blue_spymaster, operatives, operatives] {
            let events = room.apply(RoomCommand::AddPlayer { socket_id });
            assert!(error_of(&events).is_none());
        }
        (red_spymaster, blue_spymaster, operatives)
    }

    #[test]
    fn connect_replies_with_identity_and_roster() {
        let mut room = room();
        let socket_id = Uuid::new_v4();
        let events = room.apply(RoomCommand::Connect {
            socket_id,
            token: None,
        });
        client_id_of(&events);
        assert!(events.iter().any(|event| matches!(
            event,
            RoomEvent::Broadcast {
                msg: ServerMsg::RosterUpdate { .. }
            }
        )));
    }

    #[test]
    fn start_game_requires_a_valid_roster() {
        let mut room = room();
        let (socket_id, _) = connect(&mut room);
        let events = room.apply(RoomCommand::StartGame { socket_id });
        assert_eq!(error_of(&events), Some("Add a red team to get started."));
        assert_eq!(room.lifecycle(), Lifecycle::Lobby);
    }

    #[test]
    fn start_game_deals_and_locks_the_lobby() {
        let mut room = room();
        let (s1, _, _) = seat_valid_roster(&mut room);
        let events = room.apply(RoomCommand::StartGame { socket_id: s1 });

        assert_eq!(room.lifecycle(), Lifecycle::InGame);
        assert!(events.iter().any(|event| matches!(
            event,
            RoomEvent::Broadcast {
                msg: ServerMsg::GameStarted { .. }
            }
        )));
        assert!(view_for(&events, s1).is_some());

        // The lobby is locked: fresh connections are refused.
        let events = room.apply(RoomCommand::Connect {
            socket_id: Uuid::new_v4(),
            token: None,
        });
        assert!(error_of(&events).is_some());
    }

    #[test]
    fn lobby_actions_are_rejected_mid_game() {
        let mut room = room();
        let (s1, _, _) = seat_valid_roster(&mut room);
        room.apply(RoomCommand::StartGame { socket_id: s1 });

        let before = room.roster.players().count();
        let events = room.apply(RoomCommand::AddPlayer { socket_id: s1 });
        assert!(error_of(&events).is_some());
        assert_eq!(room.roster.players().count(), before);
    }

    #[test]
    fn game_actions_are_rejected_in_the_lobby() {
        let mut room = room();
        let (socket_id, _) = connect(&mut room);
        let events = room.apply(RoomCommand::SubmitClue {
            socket_id,
            word: "ocean".to_string(),
            number: 2,
        });
        assert!(error_of(&events).is_some());
    }

    #[test]
    fn spymaster_clients_get_the_solution_operatives_do_not() {
        let mut room = room();
        let (red_spymaster, _, operatives) = seat_valid_roster(&mut room);
        let events = room.apply(RoomCommand::StartGame {
            socket_id: red_spymaster,
        });

        let spymaster_view = view_for(&events, red_spymaster).expect("no spymaster view");
        assert!(spymaster_view.solution.is_some());
        let operative_view = view_for(&events, operatives).expect("no operative view");
        assert!(operative_view.solution.is_none());
    }

    #[test]
    fn bomb_guess_moves_the_room_to_the_endscreen() {
        let mut room = room();
        let (s1, _, _) = seat_valid_roster(&mut room);
        room.apply(RoomCommand::StartGame { socket_id: s1 });

        let (bomb_word, starting_team) = {
            let game = room.game().expect("no game");
            let bomb_index = game.solution().bomb_index();
            (
                game.deck().cards()[bomb_index].word.clone(),
                game.solution().starting_team(),
            )
        };

        let events = room.apply(RoomCommand::SubmitClue {
            socket_id: s1,
            word: "x".to_string(),
            number: 2,
        });
        assert!(error_of(&events).is_none());

        let events = room.apply(RoomCommand::Guess {
            socket_id: s1,
            word: bomb_word,
        });
        assert_eq!(room.lifecycle(), Lifecycle::EndScreen);
        assert!(events.iter().any(|event| matches!(
            event,
            RoomEvent::Broadcast {
                msg: ServerMsg::GameOver {
                    winner: Some(team)
                }
            } if *team == starting_team.opponent()
        )));
    }

    #[test]
    fn pause_returns_to_an_unlocked_lobby() {
        let mut room = room();
        let (s1, _, _) = seat_valid_roster(&mut room);
        room.apply(RoomCommand::StartGame { socket_id: s1 });

        let events = room.apply(RoomCommand::PauseGame { socket_id: s1 });
        assert_eq!(room.lifecycle(), Lifecycle::Lobby);
        assert!(events.iter().any(|event| matches!(
            event,
            RoomEvent::Broadcast {
                msg: ServerMsg::GamePaused
            }
        )));

        // New clients can join again.
        let events = room.apply(RoomCommand::Connect {
            socket_id: Uuid::new_v4(),
            token: None,
        });
        assert!(error_of(&events).is_none());
    }

    #[test]
    fn reconnect_mid_game_catches_the_board_up() {
        let mut room = room();
        let (s1, _, _) = seat_valid_roster(&mut room);
        let token = *room.connections.get(&s1).expect("socket not connected");
        room.apply(RoomCommand::StartGame { socket_id: s1 });

        room.apply(RoomCommand::Disconnect { socket_id: s1 });
        let replacement = Uuid::new_v4();
        let events = room.apply(RoomCommand::Connect {
            socket_id: replacement,
            token: Some(token),
        });
        assert_eq!(client_id_of(&events), token);
        assert!(view_for(&events, replacement).is_some());
    }

    #[test]
    fn disconnect_of_unknown_socket_is_a_silent_noop() {
        let mut room = room();
        let events = room.apply(RoomCommand::Disconnect {
            socket_id: Uuid::new_v4(),
        });
        assert!(events.is_empty());
    }

    #[test]
    fn finished_and_deserted_rooms_report_reapable() {
        let mut room = room();
        let (s1, s2, s3) = seat_valid_roster(&mut room);
        room.apply(RoomCommand::StartGame { socket_id: s1 });

        let bomb_word = {
            let game = room.game().expect("no game");
            game.deck().cards()[game.solution().bomb_index()].word.clone()
        };
        room.apply(RoomCommand::SubmitClue {
            socket_id: s1,
            word: "x".to_string(),
            number: 1,
        });
        room.apply(RoomCommand::Guess {
            socket_id: s1,
            word: bomb_word,
        });

        for socket_id in [s1, s2, s3] {
            room.apply(RoomCommand::Disconnect { socket_id });
        }
        assert_eq!(room.lifecycle(), Lifecycle::EndScreen);
        assert!(room.is_deserted());
    }
}
