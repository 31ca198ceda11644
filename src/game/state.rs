use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::board::{Board, Cell};
use crate::types::GameStatus;

use super::{
    moves::{MoveResult, Traversal},
    players::Player,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub min_players: usize,
    pub max_players: usize,
    /// Upper bound on adornment hops resolved from a single roll.
    pub max_adornment_chain_length: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 100,
            max_adornment_chain_length: 5,
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), GameError> {
        let reason = if self.min_players == 0 {
            "minimum player count must be at least 1".to_string()
        } else if self.min_players > self.max_players {
            format!(
                "minimum player count {} exceeds maximum {}",
                self.min_players, self.max_players
            )
        } else if self.max_adornment_chain_length == 0 {
            "adornment chain length must be at least 1".to_string()
        } else {
            return Ok(());
        };
        Err(GameError::InvalidConfiguration { reason })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
    #[error("invalid player: {reason}")]
    InvalidPlayer { reason: String },
    #[error("game can only have a maximum of {max} players")]
    CapacityExceeded { max: usize },
    #[error("game has already started")]
    AlreadyStarted,
    #[error("game needs between {min} and {max} players before starting, has {actual}")]
    InvalidPlayerCount {
        min: usize,
        max: usize,
        actual: usize,
    },
    #[error("game is not currently in progress (status {status})")]
    NotInProgress { status: GameStatus },
    #[error("no players have joined the game")]
    EmptyQueue,
    #[error("player {0} is not on the board")]
    UnknownPlayer(Uuid),
}

/// Turn order, board and lifecycle of one game. Dice live in [`super::Game`];
/// this type only applies rolled values.
#[derive(Debug, Clone)]
pub struct GameState {
    settings: GameSettings,
    board: Board,
    turn_order: VecDeque<Player>,
    status: GameStatus,
    turn: u32,
}

impl GameState {
    pub fn new(board: Board, settings: GameSettings) -> Result<Self, GameError> {
        settings.validate()?;
        Ok(Self {
            settings,
            board,
            turn_order: VecDeque::new(),
            status: GameStatus::NotStarted,
            turn: 0,
        })
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of moves played so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Players in the order they will move next.
    pub fn turn_order(&self) -> impl Iterator<Item = &Player> {
        self.turn_order.iter()
    }

    pub fn position_of(&self, player: &Player) -> Option<Cell> {
        self.board.position_of(player)
    }

    pub fn add_player(&mut self, player: Player) -> Result<(), GameError> {
        if self.board.player_count() + 1 > self.settings.max_players {
            return Err(GameError::CapacityExceeded {
                max: self.settings.max_players,
            });
        }
        self.board.add_player(player.clone())?;
        debug!(player = %player.name, id = %player.id, "player joined");
        self.turn_order.push_back(player);
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), GameError> {
        if self.status != GameStatus::NotStarted {
            return Err(GameError::AlreadyStarted);
        }
        let actual = self.board.player_count();
        let (min, max) = (self.settings.min_players, self.settings.max_players);
        if !(min..=max).contains(&actual) {
            return Err(GameError::InvalidPlayerCount { min, max, actual });
        }
        self.status = GameStatus::InProgress;
        info!(players = actual, size = self.board.size(), "game started");
        Ok(())
    }

    pub fn current_player(&self) -> Result<&Player, GameError> {
        self.turn_order.front().ok_or(GameError::EmptyQueue)
    }

    /// Everything `apply_roll` checks, without touching any state.
    pub fn check_can_move(&self) -> Result<(), GameError> {
        if self.status != GameStatus::InProgress {
            return Err(GameError::NotInProgress {
                status: self.status,
            });
        }
        let player = self.current_player()?;
        self.board
            .position_of(player)
            .ok_or(GameError::UnknownPlayer(player.id))?;
        Ok(())
    }

    /// Moves the current player by `rolled`, resolves adornments, rotates the
    /// turn order and updates the status.
    pub(crate) fn apply_roll(&mut self, rolled: u32) -> Result<MoveResult, GameError> {
        self.check_can_move()?;
        let player = self.current_player()?.clone();
        let previous_position = self
            .board
            .position_of(&player)
            .ok_or(GameError::UnknownPlayer(player.id))?;

        // Overshooting the last cell wastes the turn.
        let position_after_roll = match previous_position.checked_add(rolled) {
            Some(target) if target <= self.board.size() => target,
            _ => previous_position,
        };
        self.board.set_position_of(&player, position_after_roll);

        let (final_position, adornments_traversed) =
            self.resolve_adornments(&player, position_after_roll);

        self.turn_order.rotate_left(1);
        self.turn += 1;

        debug!(
            player = %player.name,
            rolled,
            from = previous_position,
            landed = position_after_roll,
            to = final_position,
            hops = adornments_traversed.len(),
            "move resolved"
        );

        if let Some(winner) = self.board.winner() {
            info!(winner = %winner.name, turns = self.turn, "game finished");
            self.status = GameStatus::Finished;
        }

        Ok(MoveResult {
            player,
            previous_position,
            position_after_roll,
            final_position,
            rolled_value: rolled,
            adornments_traversed,
        })
    }

    /// Follows adornments from `from` until none applies or the chain cap is
    /// hit. Hitting the cap just stops chaining.
    fn resolve_adornments(&mut self, player: &Player, from: Cell) -> (Cell, Traversal) {
        let cap = self.settings.max_adornment_chain_length;
        let mut position = from;
        let mut traversed = Traversal::new();

        while traversed.len() < cap {
            let Some(adornment) = self.board.adornment_at(position).copied() else {
                break;
            };
            trace!(
                player = %player.name,
                start = adornment.start,
                end = adornment.end,
                kind = %adornment.kind,
                "adornment hop"
            );
            position = adornment.end;
            traversed.push(adornment);
        }

        if traversed.len() == cap && self.board.adornment_at(position).is_some() {
            warn!(
                player = %player.name,
                cell = position,
                cap,
                "adornment chain cap reached; stopping"
            );
        }

        self.board.set_position_of(player, position);
        (position, traversed)
    }

    pub fn winner(&self) -> Option<&Player> {
        match self.status {
            GameStatus::Finished => self.board.winner(),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Finished
    }
}
