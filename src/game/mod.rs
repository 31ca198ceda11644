pub mod game;
pub mod moves;
pub mod players;
pub mod state;

pub use game::{Game, TURNS_LIMIT};
pub use moves::{MoveResult, Traversal};
pub use players::Player;
pub use state::{GameError, GameSettings, GameState};
