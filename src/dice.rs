use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::game::state::GameError;

pub const STANDARD_DICE_MIN: u32 = 1;
pub const STANDARD_DICE_MAX: u32 = 6;

/// Produces one integer per call within a fixed inclusive range.
pub trait RandomSource {
    fn roll(&mut self) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn roll(&mut self) -> u32 {
        (**self).roll()
    }
}

/// Uniform die over `[min, max]`, optionally seeded for reproducible games.
#[derive(Debug, Clone)]
pub struct Dice {
    min: u32,
    max: u32,
    rng: StdRng,
}

impl Dice {
    pub fn new(min: u32, max: u32, seed: Option<u64>) -> Result<Self, GameError> {
        if min == 0 || min > max {
            return Err(GameError::InvalidConfiguration {
                reason: format!("dice range [{min},{max}] must be non-empty and start at 1 or above"),
            });
        }
        Ok(Self {
            min,
            max,
            rng: rng_from(seed),
        })
    }

    pub fn standard(seed: Option<u64>) -> Self {
        Self {
            min: STANDARD_DICE_MIN,
            max: STANDARD_DICE_MAX,
            rng: rng_from(seed),
        }
    }

    pub fn range(&self) -> (u32, u32) {
        (self.min, self.max)
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl RandomSource for Dice {
    fn roll(&mut self) -> u32 {
        self.rng.gen_range(self.min..=self.max)
    }
}

/// Replays a prerecorded sequence of rolls, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: Vec<u32>,
    cursor: usize,
}

impl ScriptedDice {
    pub fn new(rolls: Vec<u32>) -> Result<Self, GameError> {
        if rolls.is_empty() {
            return Err(GameError::InvalidConfiguration {
                reason: "scripted dice need at least one roll".to_string(),
            });
        }
        Ok(Self { rolls, cursor: 0 })
    }
}

impl RandomSource for ScriptedDice {
    fn roll(&mut self) -> u32 {
        let value = self.rolls[self.cursor];
        self.cursor = (self.cursor + 1) % self.rolls.len();
        value
    }
}
