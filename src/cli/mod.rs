pub mod board_display;
pub mod stats;
pub mod tui;

pub use board_display::render_board;
pub use stats::{GameStats, StatisticsAccumulator};
pub use tui::TuiApp;

use crate::game::MoveResult;
use crate::types::AdornmentKind;

pub fn kind_label(kind: AdornmentKind) -> &'static str {
    match kind {
        AdornmentKind::Shortcut => "ladder",
        AdornmentKind::Setback => "snake",
    }
}

/// Console lines describing one move, in the order things happened.
pub fn narrate_move(result: &MoveResult) -> Vec<String> {
    let name = &result.player.name;
    let mut lines = Vec::with_capacity(result.adornments_traversed.len() + 2);

    if result.previous_position == result.position_after_roll {
        lines.push(format!(
            "{} gets a {} and stays in position {}",
            name, result.rolled_value, result.position_after_roll
        ));
    } else {
        lines.push(format!(
            "{} gets a {} and moves from {} to {}",
            name, result.rolled_value, result.previous_position, result.position_after_roll
        ));
    }

    for adornment in &result.adornments_traversed {
        lines.push(format!(
            "{} reaches a {} in position {} and moves to position {}",
            name,
            kind_label(adornment.kind),
            adornment.start,
            adornment.end
        ));
    }

    lines.push(format!(
        "Final position of {} is {}",
        name, result.final_position
    ));
    lines
}
