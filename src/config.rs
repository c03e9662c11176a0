use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::board::CardCounts;

/// Static game configuration loaded from config/game.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_num_cards")]
    pub num_cards: usize,
    #[serde(default = "default_num_bombs")]
    pub num_bombs: usize,
    #[serde(default = "default_num_reds")]
    pub num_reds: usize,
    #[serde(default = "default_num_blues")]
    pub num_blues: usize,
    #[serde(default = "default_num_neutrals")]
    pub num_neutrals: usize,
    #[serde(default = "default_game_code_len")]
    pub game_code_len: usize,
    #[serde(default = "default_avatars")]
    pub avatars: Vec<String>,
    /// Newline-separated word list; the built-in list is used when unset.
    #[serde(default)]
    pub words_file: Option<String>,
}

fn default_num_cards() -> usize {
    25
}

fn default_num_bombs() -> usize {
    1
}

fn default_num_reds() -> usize {
    8
}

fn default_num_blues() -> usize {
    8
}

fn default_num_neutrals() -> usize {
    8
}

fn default_game_code_len() -> usize {
    5
}

fn default_avatars() -> Vec<String> {
    [
        "alligator",
        "anteater",
        "armadillo",
        "badger",
        "bat",
        "beaver",
        "bison",
        "camel",
        "chameleon",
        "cheetah",
        "chinchilla",
        "chipmunk",
        "dingo",
        "dolphin",
        "elephant",
        "ferret",
        "flamingo",
        "fox",
        "gecko",
        "giraffe",
        "hedgehog",
        "hippo",
        "ibex",
        "iguana",
        "jackal",
        "kangaroo",
        "koala",
        "lemur",
        "leopard",
        "llama",
        "manatee",
        "meerkat",
        "mongoose",
        "moose",
        "narwhal",
        "ocelot",
        "otter",
        "panda",
        "pangolin",
        "penguin",
        "platypus",
        "porcupine",
        "quokka",
        "raccoon",
        "walrus",
        "wombat",
    ]
    .iter()
    .map(|a| a.to_string())
    .collect()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_cards: default_num_cards(),
            num_bombs: default_num_bombs(),
            num_reds: default_num_reds(),
            num_blues: default_num_blues(),
            num_neutrals: default_num_neutrals(),
            game_code_len: default_game_code_len(),
            avatars: default_avatars(),
            words_file: None,
        }
    }
}

impl GameConfig {
    pub fn card_counts(&self) -> CardCounts {
        CardCounts {
            bombs: self.num_bombs,
            reds: self.num_reds,
            blues: self.num_blues,
            neutrals: self.num_neutrals,
        }
    }
}

/// Resolves a path relative to the config directory.
fn config_path(sub: &str) -> PathBuf {
    let base = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config".to_string());
    Path::new(&base).join(sub)
}

pub fn words_file_path(config: &GameConfig) -> Option<PathBuf> {
    config.words_file.as_deref().map(config_path)
}

/// Initialize the config directory with defaults if missing.
pub fn init() {
    let base = config_path("");
    if !base.exists() {
        fs::create_dir_all(&base).expect("Failed to create config directory");
    }

    let game_path = config_path("game.json");
    if !game_path.exists() {
        let defaults = GameConfig::default();
        fs::write(
            &game_path,
            serde_json::to_string_pretty(&defaults).expect("Failed to serialize defaults"),
        )
        .expect("Failed to write default game.json");
    }
}

/// Load the game configuration.
pub fn load() -> GameConfig {
    let path = config_path("game.json");
    let data = fs::read_to_string(&path).expect("Failed to read game.json");
    serde_json::from_str(&data).expect("Failed to parse game.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_counts_fill_the_board() {
        let config = GameConfig::default();
        assert_eq!(config.card_counts().total(), config.num_cards);
        assert_eq!(config.num_bombs, 1);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"num_cards": 9}"#).unwrap();
        assert_eq!(config.num_cards, 9);
        assert_eq!(config.game_code_len, 5);
        assert!(!config.avatars.is_empty());
    }
}
