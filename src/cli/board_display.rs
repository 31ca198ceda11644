use itertools::Itertools;

use crate::board::{Board, Cell};
use crate::types::AdornmentKind;

pub const ROW_WIDTH: usize = 10;
const TOKEN_SLOTS: usize = 3;

pub const SHORTCUT_MARK: char = '^';
pub const SETBACK_MARK: char = 'v';

/// Token letter for the player at `seat` (join order).
pub fn token_for_seat(seat: usize) -> char {
    u8::try_from(seat)
        .ok()
        .filter(|s| *s < 26)
        .map(|s| char::from(b'A' + s))
        .unwrap_or('*')
}

pub fn print_board(board: &Board) {
    println!("{}", render_board(board, ROW_WIDTH));
}

/// Boustrophedon grid with cell 1 at the bottom left and the last cell on
/// the top row. Each cell shows its number, an adornment mark and tokens.
pub fn render_board(board: &Board, width: usize) -> String {
    let width = width.max(1);
    let cells: Vec<Cell> = (1..=board.size()).collect();

    let rows: Vec<String> = cells
        .chunks(width)
        .enumerate()
        .map(|(row_idx, row)| {
            let mut rendered = row.iter().map(|cell| render_cell(board, *cell));
            if row_idx % 2 == 0 {
                rendered.join(" ")
            } else {
                rendered.rev().join(" ")
            }
        })
        .collect();

    rows.into_iter().rev().join("\n")
}

pub fn render_legend(board: &Board) -> String {
    let players = board
        .players()
        .iter()
        .enumerate()
        .map(|(seat, player)| format!("{}={}", token_for_seat(seat), player.name))
        .join("  ");
    let adornments = board
        .adornments()
        .iter()
        .map(|a| {
            let mark = match a.kind {
                AdornmentKind::Shortcut => SHORTCUT_MARK,
                AdornmentKind::Setback => SETBACK_MARK,
            };
            format!("{}{}->{}", mark, a.start, a.end)
        })
        .join(" ");
    format!("{players}\n{adornments}")
}

fn render_cell(board: &Board, cell: Cell) -> String {
    let mark = match board.adornment_at(cell).map(|a| a.kind) {
        Some(AdornmentKind::Shortcut) => SHORTCUT_MARK,
        Some(AdornmentKind::Setback) => SETBACK_MARK,
        None => ' ',
    };

    let mut tokens: String = board
        .players()
        .iter()
        .enumerate()
        .filter(|(_, p)| board.position_of(p) == Some(cell))
        .map(|(seat, _)| token_for_seat(seat))
        .collect();
    if tokens.chars().count() > TOKEN_SLOTS {
        tokens = tokens.chars().take(TOKEN_SLOTS - 1).chain(['+']).collect();
    }

    format!("{cell:>3}{mark}{tokens:<width$}", width = TOKEN_SLOTS)
}
