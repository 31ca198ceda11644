#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod board;
pub mod cli;
pub mod config;
pub mod dice;
pub mod game;
pub mod types;

pub use board::{Adornment, Board, BoardLayout, Cell};
pub use config::{ConfigError, GameConfig};
pub use dice::{Dice, RandomSource, ScriptedDice};
pub use game::{Game, GameError, GameSettings, GameState, MoveResult, Player};
pub use types::{AdornmentKind, GameStatus};
