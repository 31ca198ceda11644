use std::collections::HashMap;
use std::time::Duration;

use crate::dice::RandomSource;
use crate::game::{Game, MoveResult};
use crate::types::AdornmentKind;

#[derive(Debug, Default, Clone)]
pub struct GameStats {
    /// Wins keyed by seat (join order).
    pub wins: HashMap<usize, u32>,
    pub games: u32,
    pub unfinished: u32,
    pub total_turns: u64,
    pub wasted_rolls: u64,
    pub hops: HashMap<AdornmentKind, u64>,
    pub longest_chain: usize,
    pub total_duration: Duration,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_move(&mut self, result: &MoveResult) {
        if result.was_wasted() {
            self.wasted_rolls += 1;
        }
        for adornment in &result.adornments_traversed {
            *self.hops.entry(adornment.kind).or_insert(0) += 1;
        }
        self.longest_chain = self.longest_chain.max(result.adornments_traversed.len());
    }

    pub fn record_game<R: RandomSource>(&mut self, game: &Game<R>, duration: Duration) {
        self.games += 1;
        self.total_duration += duration;
        self.total_turns += u64::from(game.turn());

        let seat = game
            .winner()
            .and_then(|w| game.players().iter().position(|p| p.id == w.id));
        match seat {
            Some(seat) => *self.wins.entry(seat).or_insert(0) += 1,
            None => self.unfinished += 1,
        }
    }

    pub fn hops_of(&self, kind: AdornmentKind) -> u64 {
        self.hops.get(&kind).copied().unwrap_or(0)
    }

    pub fn get_avg_turns(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games as f64
    }

    pub fn get_avg_duration(&self) -> Duration {
        if self.games == 0 {
            return Duration::ZERO;
        }
        self.total_duration / self.games
    }
}

pub struct StatisticsAccumulator {
    pub stats: GameStats,
}

impl StatisticsAccumulator {
    pub fn new() -> Self {
        Self {
            stats: GameStats::new(),
        }
    }

    pub fn on_move(&mut self, result: &MoveResult) {
        self.stats.record_move(result);
    }

    pub fn after<R: RandomSource>(&mut self, game: &Game<R>, duration: Duration) {
        self.stats.record_game(game, duration);
    }
}

impl Default for StatisticsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
