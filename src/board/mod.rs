use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::players::Player;
use crate::game::state::GameError;
use crate::types::AdornmentKind;

pub type Cell = u32;

pub const INITIAL_PLAYER_POSITION: Cell = 1;
pub const MIN_BOARD_SIZE: Cell = 2;
pub const STANDARD_BOARD_SIZE: Cell = 100;

/// Classic 100-cell layout: ten snakes followed by eleven ladders.
pub static STANDARD_ADORNMENTS: Lazy<Vec<Adornment>> = Lazy::new(|| {
    const SETBACKS: &[(Cell, Cell)] = &[
        (16, 6),
        (49, 11),
        (46, 25),
        (62, 19),
        (64, 60),
        (74, 53),
        (89, 68),
        (92, 88),
        (95, 75),
        (99, 80),
    ];
    const SHORTCUTS: &[(Cell, Cell)] = &[
        (2, 38),
        (7, 14),
        (8, 31),
        (15, 26),
        (21, 42),
        (28, 84),
        (36, 44),
        (51, 67),
        (71, 91),
        (78, 98),
        (87, 94),
    ];

    SETBACKS
        .iter()
        .map(|&(start, end)| Adornment::setback(start, end))
        .chain(
            SHORTCUTS
                .iter()
                .map(|&(start, end)| Adornment::shortcut(start, end)),
        )
        .collect()
});

/// A relocation rule: landing on `start` moves the token to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Adornment {
    pub start: Cell,
    pub end: Cell,
    pub kind: AdornmentKind,
}

impl Adornment {
    pub fn new(start: Cell, end: Cell, kind: AdornmentKind) -> Self {
        Self { start, end, kind }
    }

    pub fn shortcut(start: Cell, end: Cell) -> Self {
        Self::new(start, end, AdornmentKind::Shortcut)
    }

    pub fn setback(start: Cell, end: Cell) -> Self {
        Self::new(start, end, AdornmentKind::Setback)
    }

    pub fn starts_on(&self, cell: Cell) -> bool {
        self.start == cell
    }

    fn same_span(&self, other: &Adornment) -> bool {
        self.start == other.start && self.end == other.end
    }

    fn reverses(&self, other: &Adornment) -> bool {
        self.start == other.end && self.end == other.start
    }
}

/// Static board description handed to [`Board::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub size: Cell,
    #[serde(default)]
    pub adornments: Vec<Adornment>,
}

impl BoardLayout {
    pub fn standard() -> Self {
        Self {
            size: STANDARD_BOARD_SIZE,
            adornments: Vec::clone(&STANDARD_ADORNMENTS),
        }
    }

    pub fn empty(size: Cell) -> Self {
        Self {
            size,
            adornments: Vec::new(),
        }
    }

    pub fn build(&self) -> Result<Board, GameError> {
        Board::new(self.size, self.adornments.clone())
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    size: Cell,
    adornments: Vec<Adornment>,
    players: Vec<Player>,
    positions: HashMap<Uuid, Cell>,
}

impl Board {
    pub fn new(size: Cell, adornments: Vec<Adornment>) -> Result<Self, GameError> {
        if size < MIN_BOARD_SIZE {
            return Err(GameError::InvalidConfiguration {
                reason: format!("board size {size} is below the minimum of {MIN_BOARD_SIZE}"),
            });
        }

        let mut accepted: Vec<Adornment> = Vec::with_capacity(adornments.len());
        for adornment in adornments {
            validate_adornment(size, &adornment, &accepted)?;
            accepted.push(adornment);
        }

        Ok(Self {
            size,
            adornments: accepted,
            players: Vec::new(),
            positions: HashMap::new(),
        })
    }

    pub fn size(&self) -> Cell {
        self.size
    }

    pub fn adornments(&self) -> &[Adornment] {
        &self.adornments
    }

    /// Registered players in insertion order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn add_player(&mut self, player: Player) -> Result<(), GameError> {
        if player.name.is_empty() {
            return Err(GameError::InvalidPlayer {
                reason: "player names can't be empty".to_string(),
            });
        }
        if self.players.iter().any(|p| p.name == player.name) {
            return Err(GameError::InvalidPlayer {
                reason: format!("player name '{}' is already taken", player.name),
            });
        }
        self.positions.insert(player.id, INITIAL_PLAYER_POSITION);
        self.players.push(player);
        Ok(())
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn position_of(&self, player: &Player) -> Option<Cell> {
        self.positions.get(&player.id).copied()
    }

    /// Bounds are the caller's responsibility; untracked players are ignored.
    pub fn set_position_of(&mut self, player: &Player, cell: Cell) {
        if let Some(position) = self.positions.get_mut(&player.id) {
            *position = cell;
        }
    }

    pub fn adornment_at(&self, cell: Cell) -> Option<&Adornment> {
        self.adornments.iter().find(|a| a.starts_on(cell))
    }

    /// First-registered player sitting on the final cell.
    pub fn winner(&self) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| self.position_of(p) == Some(self.size))
    }
}

fn validate_adornment(
    size: Cell,
    candidate: &Adornment,
    accepted: &[Adornment],
) -> Result<(), GameError> {
    let invalid = |reason: String| GameError::InvalidConfiguration { reason };
    let (start, end) = (candidate.start, candidate.end);

    if candidate.starts_on(end) {
        return Err(invalid(format!("adornment starts and ends on cell {start}")));
    }
    if candidate.starts_on(size) {
        return Err(invalid(format!(
            "adornment ({start},{end}) starts on the final cell {size}"
        )));
    }
    if !(1..=size).contains(&start) || !(1..=size).contains(&end) {
        return Err(invalid(format!(
            "adornment ({start},{end}) leaves the board range [1,{size}]"
        )));
    }
    for existing in accepted {
        if existing.same_span(candidate) {
            return Err(invalid(format!("adornment ({start},{end}) is duplicated")));
        }
        if existing.reverses(candidate) {
            return Err(invalid(format!(
                "adornment ({start},{end}) reverses ({},{})",
                existing.start, existing.end
            )));
        }
        if existing.starts_on(start) {
            return Err(invalid(format!(
                "adornments ({},{}) and ({start},{end}) share start cell {start}",
                existing.start, existing.end
            )));
        }
    }
    Ok(())
}
