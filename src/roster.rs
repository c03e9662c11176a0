use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GameError;
use crate::types::{Role, Team};

/// One participant: a team, a role, and a uniquely held avatar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub team: Team,
    pub role: Role,
    pub avatar: String,
}

impl Player {
    /// Creates a player, drawing omitted attributes at random and claiming
    /// an avatar from the pool.
    pub fn create(
        pool: &mut AvatarPool,
        team: Option<Team>,
        role: Option<Role>,
    ) -> Result<Self, GameError> {
        let mut rng = rand::rng();
        let team = team.unwrap_or(if rng.random_bool(0.5) {
            Team::Red
        } else {
            Team::Blue
        });
        let role = role.unwrap_or(if rng.random_bool(0.5) {
            Role::Spymaster
        } else {
            Role::Operative
        });
        let avatar = pool.acquire()?;
        Ok(Self {
            id: Uuid::new_v4(),
            team,
            role,
            avatar,
        })
    }
}

/// Allocates avatars as a set difference over a fixed universe: acquire
/// samples the complement of the in-use set, release removes from it.
#[derive(Debug, Clone)]
pub struct AvatarPool {
    universe: Vec<String>,
    in_use: HashSet<String>,
}

impl AvatarPool {
    pub fn new(universe: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        let universe = universe
            .into_iter()
            .filter(|avatar| seen.insert(avatar.clone()))
            .collect();
        Self {
            universe,
            in_use: HashSet::new(),
        }
    }

    /// Draws a uniformly random unused avatar.
    pub fn acquire(&mut self) -> Result<String, GameError> {
        let mut rng = rand::rng();
        let free: Vec<&String> = self
            .universe
            .iter()
            .filter(|avatar| !self.in_use.contains(*avatar))
            .collect();
        let avatar = free
            .choose(&mut rng)
            .ok_or(GameError::AvatarPoolExhausted)?
            .to_string();
        self.in_use.insert(avatar.clone());
        Ok(avatar)
    }

    /// Re-acquires a dangling player's avatar. The reservation survives a
    /// disconnect, so the preferred avatar is normally kept; a fresh draw
    /// happens only if the universe no longer offers it.
    pub fn reacquire(&mut self, preferred: &str) -> Result<String, GameError> {
        if self.universe.iter().any(|avatar| avatar == preferred) {
            self.in_use.insert(preferred.to_string());
            return Ok(preferred.to_string());
        }
        self.acquire()
    }

    pub fn release(&mut self, avatar: &str) {
        self.in_use.remove(avatar);
    }

    pub fn remaining(&self) -> usize {
        self.universe.len() - self.in_use.len()
    }
}

/// One remote connection's bundle of controlled players. A client survives
/// disconnects as a dangling entry until its token reconnects.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: Uuid,
    players: HashMap<Uuid, Player>,
}

impl Client {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            players: HashMap::new(),
        }
    }

    pub fn add_player(&mut self, player: Player) -> &Player {
        let id = player.id;
        self.players.entry(id).or_insert(player)
    }

    pub fn remove_player(&mut self, player_id: Uuid) -> Result<Player, GameError> {
        self.players
            .remove(&player_id)
            .ok_or(GameError::PlayerNotFound(player_id))
    }

    pub fn has_player(&self, player_id: Uuid) -> bool {
        self.players.contains_key(&player_id)
    }

    pub fn switch_team(&mut self, player_id: Uuid) -> Result<(), GameError> {
        let player = self
            .players
            .get_mut(&player_id)
            .ok_or(GameError::PlayerNotFound(player_id))?;
        player.team = player.team.opponent();
        Ok(())
    }

    pub fn switch_role(&mut self, player_id: Uuid) -> Result<(), GameError> {
        let player = self
            .players
            .get_mut(&player_id)
            .ok_or(GameError::PlayerNotFound(player_id))?;
        player.role = player.role.toggled();
        Ok(())
    }

    pub fn has_role(&self, team: Team, role: Role) -> bool {
        self.players
            .values()
            .any(|player| player.team == team && player.role == role)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.values_mut()
    }

    pub fn player_ids(&self) -> Vec<Uuid> {
        self.players.keys().copied().collect()
    }
}

/// Why the roster is not ready for a game to start. Checks run in a fixed
/// order and the first failure wins; tests assert on exactly which error a
/// malformed roster reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterError {
    NoRedTeam,
    NoBlueTeam,
    NoRedSpymaster,
    NoBlueSpymaster,
    NoRedOperative,
    NoBlueOperative,
}

impl RosterError {
    pub fn message(self) -> &'static str {
        match self {
            Self::NoRedTeam => "Add a red team to get started.",
            Self::NoBlueTeam => "Add a blue team to get started.",
            Self::NoRedSpymaster => "Red team is missing a spymaster.",
            Self::NoBlueSpymaster => "Blue team is missing a spymaster.",
            Self::NoRedOperative => "Red team is missing an operative.",
            Self::NoBlueOperative => "Blue team is missing an operative.",
        }
    }

    /// The team/role a new player should take to clear this error.
    fn fix(self) -> (Team, Role) {
        match self {
            Self::NoRedTeam | Self::NoRedSpymaster => (Team::Red, Role::Spymaster),
            Self::NoBlueTeam | Self::NoBlueSpymaster => (Team::Blue, Role::Spymaster),
            Self::NoRedOperative => (Team::Red, Role::Operative),
            Self::NoBlueOperative => (Team::Blue, Role::Operative),
        }
    }
}

/// Owns every client of one room: the active set, the dangling set kept for
/// reconnects, and the shared avatar pool.
#[derive(Debug)]
pub struct RosterManager {
    clients: HashMap<Uuid, Client>,
    dangling: HashMap<Uuid, Client>,
    avatars: AvatarPool,
    locked: bool,
}

impl RosterManager {
    pub fn new(avatar_universe: Vec<String>) -> Self {
        Self {
            clients: HashMap::new(),
            dangling: HashMap::new(),
            avatars: AvatarPool::new(avatar_universe),
            locked: false,
        }
    }

    /// Resolves a connection to a client. A token naming a dangling client
    /// restores it with its players and avatars intact; anything else gets
    /// a fresh empty client, refused while the lobby is locked.
    pub fn connect(&mut self, token: Option<Uuid>) -> Result<&Client, GameError> {
        if let Some(id) = token {
            if self.clients.contains_key(&id) {
                return Ok(&self.clients[&id]);
            }
            // Re-acquire avatars in place, so a failure leaves the dangling
            // entry untouched for a later retry.
            if let Some(client) = self.dangling.get_mut(&id) {
                for player in client.players_mut() {
                    player.avatar = self.avatars.reacquire(&player.avatar)?;
                }
            }
            if let Some(client) = self.dangling.remove(&id) {
                return Ok(self.clients.entry(id).or_insert(client));
            }
        }

        if self.locked {
            return Err(GameError::LobbyLocked);
        }
        let client = Client::new();
        Ok(self.clients.entry(client.id).or_insert(client))
    }

    /// Moves a client to the dangling set, releasing nothing: players and
    /// avatars stay reserved for a reconnect. Unknown ids are a no-op.
    pub fn disconnect(&mut self, client_id: Uuid) {
        if let Some(client) = self.clients.remove(&client_id) {
            self.dangling.insert(client_id, client);
        }
    }

    /// Adds a player to the client, picking the team/role that clears the
    /// first outstanding roster error, or at random once the roster is
    /// complete.
    pub fn add_player(&mut self, client_id: Uuid) -> Result<&Player, GameError> {
        let (team, role) = match self.validate() {
            Some(error) => {
                let (team, role) = error.fix();
                (Some(team), Some(role))
            }
            None => (None, None),
        };
        let client = self
            .clients
            .get_mut(&client_id)
            .ok_or(GameError::ClientNotFound(client_id))?;
        let player = Player::create(&mut self.avatars, team, role)?;
        tracing::debug!(
            "player {} joined as {} {}, {} avatars left",
            player.id,
            player.team,
            player.role,
            self.avatars.remaining()
        );
        Ok(client.add_player(player))
    }

    /// Removes one of the client's own players and returns its avatar to
    /// the pool.
    pub fn remove_player(&mut self, client_id: Uuid, player_id: Uuid) -> Result<(), GameError> {
        let client = self.owned(client_id, player_id)?;
        let player = client.remove_player(player_id)?;
        self.avatars.release(&player.avatar);
        Ok(())
    }

    pub fn switch_team(&mut self, client_id: Uuid, player_id: Uuid) -> Result<(), GameError> {
        self.owned(client_id, player_id)?.switch_team(player_id)
    }

    pub fn switch_role(&mut self, client_id: Uuid, player_id: Uuid) -> Result<(), GameError> {
        self.owned(client_id, player_id)?.switch_role(player_id)
    }

    fn owned(&mut self, client_id: Uuid, player_id: Uuid) -> Result<&mut Client, GameError> {
        let client = self
            .clients
            .get_mut(&client_id)
            .ok_or(GameError::ClientNotFound(client_id))?;
        if !client.has_player(player_id) {
            return Err(GameError::NotPlayerOwner {
                client: client_id,
                player: player_id,
            });
        }
        Ok(client)
    }

    /// Validates team and role balance. Checks run in a fixed order: team
    /// existence first, then spymasters, then operatives.
    pub fn validate(&self) -> Option<RosterError> {
        let mut red = false;
        let mut blue = false;
        let mut red_spymaster = false;
        let mut blue_spymaster = false;
        let mut red_operative = false;
        let mut blue_operative = false;

        for player in self.players() {
            match (player.team, player.role) {
                (Team::Red, Role::Spymaster) => {
                    red = true;
                    red_spymaster = true;
                }
                (Team::Red, Role::Operative) => {
                    red = true;
                    red_operative = true;
                }
                (Team::Blue, Role::Spymaster) => {
                    blue = true;
                    blue_spymaster = true;
                }
                (Team::Blue, Role::Operative) => {
                    blue = true;
                    blue_operative = true;
                }
            }
        }

        if !red {
            Some(RosterError::NoRedTeam)
        } else if !blue {
            Some(RosterError::NoBlueTeam)
        } else if !red_spymaster {
            Some(RosterError::NoRedSpymaster)
        } else if !blue_spymaster {
            Some(RosterError::NoBlueSpymaster)
        } else if !red_operative {
            Some(RosterError::NoRedOperative)
        } else if !blue_operative {
            Some(RosterError::NoBlueOperative)
        } else {
            None
        }
    }

    /// Players of all active clients. Dangling clients keep theirs reserved
    /// but out of sight.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.clients.values().flat_map(|client| client.players())
    }

    pub fn client(&self, client_id: Uuid) -> Option<&Client> {
        self.clients.get(&client_id)
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    #[cfg(test)]
    fn has_dangling(&self, client_id: Uuid) -> bool {
        self.dangling.contains_key(&client_id)
    }
}
