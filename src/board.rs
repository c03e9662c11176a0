use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::types::{CardStatus, Team};

/// A single word card on the board. The word and position never change after
/// creation; the status is mutated once, when a guess reveals the card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub word: String,
    pub status: CardStatus,
    #[serde(skip)]
    pub position: usize,
}

impl Card {
    fn new(word: String, position: usize) -> Self {
        Self {
            word,
            status: CardStatus::Empty,
            position,
        }
    }
}

/// The deck of cards composing the board. The set of cards never changes for
/// the lifetime of a game, only their statuses do.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds a deck from a word list, assigning positions in input order.
    pub fn new(words: Vec<String>) -> Self {
        let cards = words
            .into_iter()
            .enumerate()
            .map(|(position, word)| Card::new(word, position))
            .collect();
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn status_at(&self, index: usize) -> Option<CardStatus> {
        self.cards.get(index).map(|card| card.status)
    }

    /// Position of the unrevealed card carrying `word`, if any. Revealed
    /// cards are not matched, so a word can never be guessed twice.
    pub fn position_of_unrevealed(&self, word: &str) -> Option<usize> {
        self.cards
            .iter()
            .find(|card| card.status == CardStatus::Empty && card.word == word)
            .map(|card| card.position)
    }

    /// Sets the status of the card at `index`. Callers reveal each card at
    /// most once; a re-reveal overwrites silently.
    pub fn reveal_at(&mut self, index: usize, status: CardStatus) -> Result<(), GameError> {
        let card = self
            .cards
            .get_mut(index)
            .ok_or(GameError::InvalidIndex(index))?;
        card.status = status;
        Ok(())
    }
}

/// How many cards of each identity go into the solution bag.
#[derive(Debug, Clone, Copy)]
pub struct CardCounts {
    pub bombs: usize,
    pub reds: usize,
    pub blues: usize,
    pub neutrals: usize,
}

impl CardCounts {
    pub fn total(&self) -> usize {
        self.bombs + self.reds + self.blues + self.neutrals
    }
}

/// The hidden ground-truth assignment of card identities, visible only to
/// spymasters. Immutable after generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionMap {
    starting_team: Team,
    assignment: Vec<CardStatus>,
    bomb_index: usize,
}

impl SolutionMap {
    /// Generates a solution by shuffling a bag with exactly the configured
    /// counts of each identity. The starting team is drawn at random.
    pub fn generate(counts: CardCounts, num_cards: usize) -> Result<Self, GameError> {
        if counts.total() != num_cards || counts.bombs < 1 {
            return Err(GameError::InvalidConfiguration {
                expected: num_cards,
            });
        }

        let mut rng = rand::rng();

        let mut assignment = Vec::with_capacity(num_cards);
        assignment.extend(std::iter::repeat_n(CardStatus::Bomb, counts.bombs));
        assignment.extend(std::iter::repeat_n(CardStatus::Red, counts.reds));
        assignment.extend(std::iter::repeat_n(CardStatus::Blue, counts.blues));
        assignment.extend(std::iter::repeat_n(CardStatus::Neutral, counts.neutrals));
        assignment.shuffle(&mut rng);

        let starting_team = if rng.random_bool(0.5) {
            Team::Red
        } else {
            Team::Blue
        };

        Ok(Self::from_assignment(starting_team, assignment))
    }

    /// Builds a solution from a fixed assignment. The bomb index is the
    /// position of the first bomb in the assignment.
    pub(crate) fn from_assignment(starting_team: Team, assignment: Vec<CardStatus>) -> Self {
        let bomb_index = assignment
            .iter()
            .position(|status| *status == CardStatus::Bomb)
            .unwrap_or(0);
        Self {
            starting_team,
            assignment,
            bomb_index,
        }
    }

    pub fn starting_team(&self) -> Team {
        self.starting_team
    }

    pub fn bomb_index(&self) -> usize {
        self.bomb_index
    }

    pub fn status_at(&self, position: usize) -> CardStatus {
        self.assignment[position]
    }

    pub fn count_of(&self, status: CardStatus) -> usize {
        self.assignment.iter().filter(|s| **s == status).count()
    }

    /// The number of cards a team must find to win.
    pub fn required(&self, team: Team) -> usize {
        self.count_of(team.color())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{i}")).collect()
    }

    #[test]
    fn deck_assigns_positions_in_input_order() {
        let deck = Deck::new(words(5));
        for (i, card) in deck.cards().iter().enumerate() {
            assert_eq!(card.position, i);
            assert_eq!(card.status, CardStatus::Empty);
        }
    }

    #[test]
    fn reveal_out_of_bounds_fails() {
        let mut deck = Deck::new(words(5));
        assert!(matches!(
            deck.reveal_at(5, CardStatus::Red),
            Err(GameError::InvalidIndex(5))
        ));
    }

    #[test]
    fn revealed_cards_are_not_matched_by_word() {
        let mut deck = Deck::new(words(5));
        assert_eq!(deck.position_of_unrevealed("word2"), Some(2));
        deck.reveal_at(2, CardStatus::Neutral).unwrap();
        assert_eq!(deck.position_of_unrevealed("word2"), None);
    }

    #[test]
    fn generated_solution_has_exact_counts() {
        for (bombs, reds, blues, neutrals) in [(1, 9, 8, 7), (1, 2, 1, 1), (2, 4, 4, 2)] {
            let counts = CardCounts {
                bombs,
                reds,
                blues,
                neutrals,
            };
            let solution = SolutionMap::generate(counts, counts.total()).unwrap();
            assert_eq!(solution.count_of(CardStatus::Bomb), bombs);
            assert_eq!(solution.count_of(CardStatus::Red), reds);
            assert_eq!(solution.count_of(CardStatus::Blue), blues);
            assert_eq!(solution.count_of(CardStatus::Neutral), neutrals);
            assert_eq!(solution.status_at(solution.bomb_index()), CardStatus::Bomb);
        }
    }

    #[test]
    fn mismatched_counts_are_rejected() {
        let counts = CardCounts {
            bombs: 1,
            reds: 8,
            blues: 8,
            neutrals: 7,
        };
        assert!(matches!(
            SolutionMap::generate(counts, 26),
            Err(GameError::InvalidConfiguration { expected: 26 })
        ));
    }

    #[test]
    fn bombless_bag_is_rejected() {
        let counts = CardCounts {
            bombs: 0,
            reds: 9,
            blues: 9,
            neutrals: 7,
        };
        assert!(matches!(
            SolutionMap::generate(counts, 25),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }
}
