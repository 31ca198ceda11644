use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::BoardLayout;
use crate::dice::{Dice, STANDARD_DICE_MAX, STANDARD_DICE_MIN};
use crate::game::{Game, GameError, GameSettings};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] GameError),
}

/// Everything needed to set up a game before players join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: BoardLayout,
    pub settings: GameSettings,
    pub dice_min: u32,
    pub dice_max: u32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardLayout::standard(),
            settings: GameSettings::default(),
            dice_min: STANDARD_DICE_MIN,
            dice_max: STANDARD_DICE_MAX,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn build(&self) -> Result<Game<Dice>, GameError> {
        let board = self.board.build()?;
        let dice = Dice::new(self.dice_min, self.dice_max, self.seed)?;
        Game::new(board, dice, self.settings.clone())
    }
}
