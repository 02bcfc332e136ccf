use rand::Rng;

use crate::constants::FOOD_CELLS;

/// Source of food cell indices.
///
/// Every `rand::Rng` is a source, so a seeded `StdRng` gives reproducible
/// games and the default build seeds one from OS entropy.
pub trait RandomSource {
    /// Uniform integer in `0..FOOD_CELLS`.
    fn cell_index(&mut self) -> i32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn cell_index(&mut self) -> i32 {
        self.gen_range(0..FOOD_CELLS)
    }
}
