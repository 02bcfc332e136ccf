/// Board extent in world units. The board spans `0..=BOARD_EXTENT` on both axes.
pub const BOARD_EXTENT: i32 = 600;

/// Distance travelled per tick, also the side of one cell.
pub const CELL_PITCH: i32 = 30;
pub const HALF_CELL: i32 = CELL_PITCH / 2;

/// Food lives on `FOOD_OFFSET + CELL_PITCH * k` for `k` in `0..FOOD_CELLS`.
pub const FOOD_OFFSET: i32 = 15;
pub const FOOD_CELLS: i32 = 20;

pub const START_X: i32 = 315;
pub const START_Y: i32 = 315;

pub const SCORE_PER_FOOD: u32 = 10;

pub const DEFAULT_TICK_MS: u64 = 200;

// World space shown in the window, the board plus a margin on each side.
pub const VIEW_MIN: i32 = -40;
pub const VIEW_MAX: i32 = 640;
pub const VIEW_SIZE: usize = (VIEW_MAX - VIEW_MIN) as usize;

pub const SCORE_LABEL_X: i32 = 315;
pub const SCORE_LABEL_Y: i32 = 610;
pub const GAME_OVER_LABEL_X: i32 = 315;
pub const GAME_OVER_LABEL_Y: i32 = 315;

pub const TITLE: &str = "Snake Game";
