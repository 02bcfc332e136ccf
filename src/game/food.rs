use crate::constants::{CELL_PITCH, FOOD_OFFSET};
use crate::graphics::Argb;

use super::{Position, RandomSource};

pub const FOOD_COLOR: Argb = 0xFF_FF_00_00;

#[derive(Debug, Clone)]
pub struct Food {
    pos: Position,
    color: Argb,
}

impl Food {
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let mut food = Self {
            pos: Position::default(),
            color: FOOD_COLOR,
        };
        food.relocate(rng);
        food
    }

    #[cfg(test)]
    pub fn at(pos: Position) -> Self {
        Self {
            pos,
            color: FOOD_COLOR,
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn color(&self) -> Argb {
        self.color
    }

    /// Picks a fresh cell. The snake may be sitting on it.
    pub fn relocate<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Position {
        let x = FOOD_OFFSET + CELL_PITCH * rng.cell_index();
        let y = FOOD_OFFSET + CELL_PITCH * rng.cell_index();
        self.pos = Position::new(x, y);
        self.pos
    }
}
