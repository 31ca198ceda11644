use uuid::Uuid;

use crate::board::{Board, Cell};
use crate::dice::{Dice, RandomSource};
use crate::game::moves::MoveResult;
use crate::game::players::Player;
use crate::game::state::{GameError, GameSettings, GameState};
use crate::types::GameStatus;

pub const TURNS_LIMIT: u32 = 10_000;

/// A game session: state machine plus the dice that drive it.
///
/// Settings are fixed once the game is built:
///
/// ```compile_fail
/// use snakes_ladders_rs::{Board, Dice, Game, GameSettings};
///
/// let board = Board::new(10, Vec::new()).unwrap();
/// let mut game = Game::new(board, Dice::standard(None), GameSettings::default()).unwrap();
/// game.state.settings.max_adornment_chain_length = 0;
/// ```
pub struct Game<R: RandomSource = Dice> {
    pub id: Uuid,
    state: GameState,
    dice: R,
}

impl<R: RandomSource> Game<R> {
    pub fn new(board: Board, dice: R, settings: GameSettings) -> Result<Self, GameError> {
        Ok(Self {
            id: Uuid::new_v4(),
            state: GameState::new(board, settings)?,
            dice,
        })
    }

    pub fn add_player(&mut self, player: Player) -> Result<(), GameError> {
        self.state.add_player(player)
    }

    pub fn start(&mut self) -> Result<(), GameError> {
        self.state.start()
    }

    pub fn current_player(&self) -> Result<&Player, GameError> {
        self.state.current_player()
    }

    /// Rolls for the current player and plays their turn.
    pub fn next_move(&mut self) -> Result<MoveResult, GameError> {
        self.state.check_can_move()?;
        let rolled = self.dice.roll();
        self.state.apply_roll(rolled)
    }

    pub fn winner(&self) -> Option<&Player> {
        self.state.winner()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    pub fn settings(&self) -> &GameSettings {
        self.state.settings()
    }

    pub fn position_of(&self, player: &Player) -> Option<Cell> {
        self.state.position_of(player)
    }

    /// Players in the order they will move next.
    pub fn turn_order(&self) -> impl Iterator<Item = &Player> {
        self.state.turn_order()
    }

    pub fn players(&self) -> &[Player] {
        self.state.board().players()
    }

    pub fn turn(&self) -> u32 {
        self.state.turn()
    }

    /// Plays moves until someone wins or `turn_limit` moves have been made.
    pub fn play(&mut self, turn_limit: u32) -> Result<Option<&Player>, GameError> {
        if self.status() == GameStatus::NotStarted {
            self.start()?;
        }
        while !self.is_over() && self.turn() < turn_limit {
            self.next_move()?;
        }
        Ok(self.winner())
    }
}
