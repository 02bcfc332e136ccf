use crate::constants::{BOARD_EXTENT, SCORE_PER_FOOD};
use crate::graphics::Argb;

use super::{Direction, Position};

pub const SNAKE_COLOR: Argb = 0xFF_00_80_00;

/// One body square. Color rides along so renderers need nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub pos: Position,
    pub color: Argb,
}

/// The player. Segments are stored oldest first, the last one is the head.
#[derive(Debug, Clone)]
pub struct Snake {
    head: Position,
    velocity: Position,
    color: Argb,
    segments: Vec<Segment>,
    current_score: u32,
    high_score: u32,
}

impl Snake {
    pub fn new(start: Position, color: Argb) -> Self {
        let mut snake = Self {
            head: start,
            velocity: Position::default(),
            color,
            segments: Vec::new(),
            current_score: 0,
            high_score: 0,
        };
        snake.grow();
        snake
    }

    pub fn head(&self) -> Position {
        self.head
    }

    #[cfg(test)]
    pub fn velocity(&self) -> Position {
        self.velocity
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn current_score(&self) -> u32 {
        self.current_score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Zeroes the running score without touching the body.
    pub fn clear_score(&mut self) {
        self.current_score = 0;
    }

    /// Turning into the body is allowed, the next collision check catches it.
    pub fn set_direction(&mut self, dir: Direction) {
        self.velocity = dir.velocity();
    }

    /// Moves the head one step. Returns `true` when the new head lands on
    /// `food`; the caller is then responsible for relocating the food.
    pub fn advance(&mut self, food: Position) -> bool {
        assert!(!self.segments.is_empty(), "advance called on a snake with no segments");

        self.head = self.head + self.velocity;

        if self.head == food {
            self.grow();
            self.current_score += SCORE_PER_FOOD;
            self.high_score = self.high_score.max(self.current_score);
            return true;
        }

        let last = self.segments.len() - 1;
        for i in 0..last {
            self.segments[i].pos = self.segments[i + 1].pos;
        }
        self.segments[last].pos = self.head;

        false
    }

    /// Touching a wall counts as hitting it.
    pub fn boundary_collision(&self) -> bool {
        let Position { x, y } = self.head;
        x <= 0 || x >= BOARD_EXTENT || y <= 0 || y >= BOARD_EXTENT
    }

    /// A snake standing still never runs into itself. This keeps the stacked
    /// pair of segments left by a restart from counting as a hit.
    pub fn body_collision(&self) -> bool {
        if self.velocity == Position::default() {
            return false;
        }

        let Some((_, trailing)) = self.segments.split_last() else {
            return false;
        };

        trailing.iter().any(|s| s.pos == self.head)
    }

    /// Back to a single segment at `start`. The high score survives.
    pub fn reset(&mut self, start: Position) {
        self.segments.clear();
        self.current_score = 0;
        self.velocity = Position::default();
        self.head = start;
        self.grow();
    }

    pub fn grow(&mut self) {
        self.segments.push(Segment {
            pos: self.head,
            color: self.color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    fn positions(s: &Snake) -> Vec<Position> {
        s.segments().iter().map(|s| s.pos).collect()
    }

    fn at(x: i32, y: i32) -> Snake {
        Snake::new(Position::new(x, y), SNAKE_COLOR)
    }

    const FAR: Position = Position::new(585, 585);

    #[test]
    fn fresh_snake_has_one_segment() {
        let s = at(START_X, START_Y);
        assert_eq!(s.len(), 1);
        assert_eq!(s.head(), Position::new(315, 315));
        assert_eq!(s.velocity(), Position::default());
        assert_eq!(s.current_score(), 0);
        assert!(!s.body_collision());
        assert!(!s.boundary_collision());
    }

    #[test]
    fn set_direction_only_changes_velocity() {
        let mut s = at(315, 315);
        for (dir, v) in [
            (Direction::Up, (0, 30)),
            (Direction::Down, (0, -30)),
            (Direction::Left, (-30, 0)),
            (Direction::Right, (30, 0)),
        ] {
            s.set_direction(dir);
            assert_eq!(s.velocity(), Position::new(v.0, v.1));
            assert_eq!(s.head(), Position::new(315, 315));
        }
    }

    #[test]
    fn move_right_without_food() {
        let mut s = at(315, 315);
        s.set_direction(Direction::Right);
        assert!(!s.advance(Position::new(585, 315)));
        assert_eq!(s.head(), Position::new(345, 315));
        assert_eq!(positions(&s), vec![Position::new(345, 315)]);
    }

    #[test]
    fn stationary_advance_keeps_everything() {
        let mut s = at(315, 315);
        assert!(!s.advance(FAR));
        assert_eq!(s.head(), Position::new(315, 315));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn eating_grows_and_scores() {
        let mut s = at(315, 315);
        s.set_direction(Direction::Up);
        assert!(s.advance(Position::new(315, 345)));
        assert_eq!(s.len(), 2);
        assert_eq!(s.current_score(), 10);
        assert_eq!(s.high_score(), 10);
        assert_eq!(
            positions(&s),
            vec![Position::new(315, 315), Position::new(315, 345)]
        );
        assert!(!s.body_collision());
    }

    #[test]
    fn body_follows_the_head() {
        let mut s = at(315, 315);
        s.set_direction(Direction::Right);
        assert!(s.advance(Position::new(345, 315)));
        assert!(s.advance(Position::new(375, 315)));
        // [315, 345, 375] along x
        s.set_direction(Direction::Up);
        assert!(!s.advance(FAR));

        assert_eq!(
            positions(&s),
            vec![
                Position::new(345, 315),
                Position::new(375, 315),
                Position::new(375, 345),
            ]
        );
        assert_eq!(s.len(), 3);
        assert_eq!(s.head(), Position::new(375, 345));
    }

    #[test]
    fn turning_back_into_a_long_body_collides() {
        let mut s = at(315, 315);
        s.set_direction(Direction::Right);
        for x in [345, 375, 405, 435] {
            assert!(s.advance(Position::new(x, 315)));
        }
        // five segments in a row, head at 435
        s.set_direction(Direction::Up);
        s.advance(FAR);
        s.set_direction(Direction::Left);
        s.advance(FAR);
        s.set_direction(Direction::Down);
        s.advance(FAR);

        assert_eq!(s.head(), Position::new(405, 315));
        assert!(s.body_collision());
    }

    #[test]
    fn two_segment_reverse_is_not_a_collision() {
        let mut s = at(315, 315);
        s.set_direction(Direction::Right);
        assert!(s.advance(Position::new(345, 315)));
        s.set_direction(Direction::Left);
        s.advance(FAR);
        assert_eq!(s.head(), Position::new(315, 315));
        assert!(!s.body_collision());
    }

    #[test]
    fn walls_are_inclusive() {
        for (x, y, hit) in [
            (0, 315, true),
            (600, 315, true),
            (315, 0, true),
            (315, 600, true),
            (-15, 315, true),
            (615, 315, true),
            (315, -15, true),
            (30, 30, false),
            (570, 570, false),
            (15, 585, false),
        ] {
            assert_eq!(at(x, y).boundary_collision(), hit, "({x}, {y})");
        }
    }

    #[test]
    fn interior_lattice_is_safe() {
        for k in 0..FOOD_CELLS {
            for j in 0..FOOD_CELLS {
                let s = at(FOOD_OFFSET + CELL_PITCH * k, FOOD_OFFSET + CELL_PITCH * j);
                assert!(!s.boundary_collision());
            }
        }
    }

    #[test]
    fn reset_keeps_high_score() {
        let mut s = at(315, 315);
        s.set_direction(Direction::Right);
        s.advance(Position::new(345, 315));
        s.advance(Position::new(375, 315));
        assert_eq!(s.high_score(), 20);

        s.reset(Position::new(START_X, START_Y));
        assert_eq!(s.len(), 1);
        assert_eq!(s.current_score(), 0);
        assert_eq!(s.high_score(), 20);
        assert_eq!(s.velocity(), Position::default());
        assert_eq!(s.head(), Position::new(315, 315));
    }

    #[test]
    fn reset_then_grow_is_two_stacked_segments() {
        let mut s = at(100, 100);
        s.reset(Position::new(START_X, START_Y));
        s.grow();
        assert_eq!(s.len(), 2);
        assert!(!s.body_collision());

        s.set_direction(Direction::Right);
        s.advance(FAR);
        assert_eq!(
            positions(&s),
            vec![Position::new(315, 315), Position::new(345, 315)]
        );
        assert!(!s.body_collision());
    }

    #[test]
    #[should_panic]
    fn advance_without_segments_panics() {
        let mut s = at(315, 315);
        s.segments.clear();
        s.advance(FAR);
    }
}
