use serde::{Deserialize, Serialize};

use crate::board::{Card, Deck, SolutionMap};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::turn::TurnState;
use crate::types::{CardStatus, Role, Team};
use crate::words::WordSource;

/// The clue the active spymaster has given. Exists only between clue
/// submission and the end of the operative phase it opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clue {
    pub word: String,
    pub remaining_guesses: u32,
}

impl Clue {
    /// Sentinel sent to clients while no clue is active.
    fn empty() -> Self {
        Self {
            word: String::new(),
            remaining_guesses: 0,
        }
    }
}

/// One guessed word and the identity the reveal uncovered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessRecord {
    pub word: String,
    pub status: CardStatus,
}

/// Record of one completed turn: the clue, every guess made under it, and
/// how many of them hit the guessing team's own color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub team: Team,
    pub clue: Clue,
    pub guesses: Vec<GuessRecord>,
    pub num_correct: u32,
    pub num_incorrect: u32,
}

/// Append-only log of completed turns.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}

/// Buffer for the turn currently being played. Opened when the clue is
/// submitted, flushed into the log when the turn (or the game) ends.
#[derive(Debug, Clone)]
struct PendingEntry {
    team: Team,
    clue: Clue,
    guesses: Vec<GuessRecord>,
}

impl PendingEntry {
    fn new(team: Team, clue: Clue) -> Self {
        Self {
            team,
            clue,
            guesses: Vec::new(),
        }
    }

    fn track(&mut self, word: &str, status: CardStatus) {
        self.guesses.push(GuessRecord {
            word: word.to_string(),
            status,
        });
    }

    fn build(self) -> LogEntry {
        let own_color = self.team.color();
        let num_correct = self.guesses.iter().filter(|g| g.status == own_color).count() as u32;
        let num_incorrect = self.guesses.len() as u32 - num_correct;
        LogEntry {
            team: self.team,
            clue: self.clue,
            guesses: self.guesses,
            num_correct,
            num_incorrect,
        }
    }
}

/// Outcome of a single guess.
#[derive(Debug, Clone, Copy)]
pub struct GuessResult {
    pub correct: bool,
    pub status: CardStatus,
}

/// Snapshot of game state as sent to one connection. The solution map is
/// present only in views built for spymasters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameView {
    pub deck: Vec<Card>,
    pub red_count: usize,
    pub blue_count: usize,
    pub current_clue: Clue,
    pub current_team: Team,
    pub current_role: Role,
    pub activity_log: Vec<LogEntry>,
    pub winner: Option<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<SolutionMap>,
}

/// One running game: the board, the hidden solution, turn order, the active
/// clue, and the record of play.
#[derive(Debug, Clone)]
pub struct Game {
    deck: Deck,
    solution: SolutionMap,
    red_found: usize,
    blue_found: usize,
    turn: TurnState,
    clue: Option<Clue>,
    log: ActivityLog,
    pending: Option<PendingEntry>,
}

impl Game {
    /// Draws a fresh board from the word source and deals a new solution.
    pub fn start(words: &dyn WordSource, config: &GameConfig) -> Result<Self, GameError> {
        let sampled = words.sample(config.num_cards)?;
        let solution = SolutionMap::generate(config.card_counts(), config.num_cards)?;
        Ok(Self::with_board(Deck::new(sampled), solution))
    }

    fn with_board(deck: Deck, solution: SolutionMap) -> Self {
        let turn = TurnState::new(solution.starting_team());
        Self {
            deck,
            solution,
            red_found: 0,
            blue_found: 0,
            turn,
            clue: None,
            log: ActivityLog::default(),
            pending: None,
        }
    }

    pub fn current_turn(&self) -> (Team, Role) {
        self.turn.current()
    }

    /// Sets the active clue and hands the turn to the spymaster's own
    /// operatives. Legal only during a spymaster phase.
    pub fn submit_clue(&mut self, word: &str, number: u32) -> Result<(), GameError> {
        let (team, role) = self.turn.current();
        if role != Role::Spymaster {
            return Err(GameError::IllegalPhase);
        }
        if word.trim().is_empty() {
            return Err(GameError::InvalidClue);
        }

        let clue = Clue {
            word: word.to_string(),
            remaining_guesses: number,
        };
        self.pending = Some(PendingEntry::new(team, clue.clone()));
        self.clue = Some(clue);
        self.turn.advance();
        Ok(())
    }

    /// Resolves one guess against the solution map. A correct guess spends
    /// one of the clue's guesses; anything else ends the turn on the spot,
    /// and a bomb ends the game.
    pub fn guess(&mut self, word: &str) -> Result<GuessResult, GameError> {
        let team = self.turn.current().0;
        let remaining = self
            .clue
            .as_ref()
            .map(|clue| clue.remaining_guesses)
            .ok_or(GameError::NoActiveClue)?;
        if remaining == 0 {
            return Err(GameError::NoGuessesRemaining);
        }
        let position = self
            .deck
            .position_of_unrevealed(word)
            .ok_or_else(|| GameError::UnknownWord(word.to_string()))?;

        let status = self.solution.status_at(position);
        self.deck.reveal_at(position, status)?;
        if let Some(pending) = self.pending.as_mut() {
            pending.track(word, status);
        }

        let correct = status == team.color();
        if correct {
            match team {
                Team::Red => self.red_found += 1,
                Team::Blue => self.blue_found += 1,
            }
        }

        let remaining = if correct { remaining - 1 } else { 0 };
        if let Some(clue) = self.clue.as_mut() {
            clue.remaining_guesses = remaining;
        }
        if remaining == 0 {
            self.end_turn();
        }

        // A win can land mid-clue, with no turn switch to flush the log.
        if self.is_game_over() {
            self.flush_pending();
        }

        Ok(GuessResult { correct, status })
    }

    fn end_turn(&mut self) {
        self.flush_pending();
        self.clue = None;
        self.turn.advance();
    }

    fn flush_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.log.push(pending.build());
        }
    }

    /// The game is over once the bomb is revealed or either team has found
    /// its full card count. Monotonic: revealed cards stay revealed and
    /// found counts never decrease.
    pub fn is_game_over(&self) -> bool {
        self.deck.status_at(self.solution.bomb_index()) == Some(CardStatus::Bomb)
            || self.red_found == self.solution.required(Team::Red)
            || self.blue_found == self.solution.required(Team::Blue)
    }

    /// The winning team, once the game is over. A revealed bomb loses the
    /// game for the team that guessed it.
    pub fn winner(&self) -> Option<Team> {
        if !self.is_game_over() {
            return None;
        }
        if self.deck.status_at(self.solution.bomb_index()) == Some(CardStatus::Bomb) {
            return self
                .log
                .entries()
                .iter()
                .rev()
                .find(|entry| entry.guesses.iter().any(|g| g.status == CardStatus::Bomb))
                .map(|entry| entry.team.opponent());
        }
        if self.red_found == self.solution.required(Team::Red) {
            Some(Team::Red)
        } else {
            Some(Team::Blue)
        }
    }

    /// Builds the state snapshot for one connection. Operatives never
    /// receive the solution map.
    pub fn serialize(&self, for_role: Role) -> GameView {
        let (current_team, current_role) = self.turn.current();
        GameView {
            deck: self.deck.cards().to_vec(),
            red_count: self.red_found,
            blue_count: self.blue_found,
            current_clue: self.clue.clone().unwrap_or_else(Clue::empty),
            current_team,
            current_role,
            activity_log: self.log.entries().to_vec(),
            winner: self.winner(),
            solution: (for_role == Role::Spymaster).then(|| self.solution.clone()),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(words: Vec<String>, solution: SolutionMap) -> Self {
        Self::with_board(Deck::new(words), solution)
    }

    #[cfg(test)]
    pub(crate) fn solution(&self) -> &SolutionMap {
        &self.solution
    }

    #[cfg(test)]
    pub(crate) fn deck(&self) -> &Deck {
        &self.deck
    }
}
