pub mod controller;
pub mod food;
pub mod rng;
pub mod snake;


use std::ops;
use std::time::Duration;

pub use controller::Controller;
pub use food::Food;
pub use rng::RandomSource;
pub use snake::Snake;

use crate::constants::CELL_PITCH;

/// A point in world units. The y axis points up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl ops::Add for Position {
    type Output = Position;
    fn add(self, other: Position) -> Position {
        Position::new(self.x + other.x, self.y + other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// One cell step in this direction.
    pub fn velocity(self) -> Position {
        match self {
            Direction::Up => Position::new(0, CELL_PITCH),
            Direction::Down => Position::new(0, -CELL_PITCH),
            Direction::Left => Position::new(-CELL_PITCH, 0),
            Direction::Right => Position::new(CELL_PITCH, 0),
        }
    }
}

/// Everything the input layer is allowed to send to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    Restart,
}

impl Command {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Command::Up => Some(Direction::Up),
            Command::Down => Some(Direction::Down),
            Command::Left => Some(Direction::Left),
            Command::Right => Some(Direction::Right),
            Command::Restart => None,
        }
    }
}

/// Presentation sink. Called by the controller whenever the picture changes.
pub trait Renderer {
    /// Draws the board contents, one call per segment record plus the food.
    fn draw_scene(&mut self, snake: &Snake, food: &Food);

    fn draw_status(&mut self, score: u32, high_score: u32, game_over: bool);
}

/// Timer collaborator. `schedule` asks for `Controller::tick` to be called
/// once more after `after` has elapsed.
pub trait Scheduler {
    fn schedule(&mut self, after: Duration);
}
