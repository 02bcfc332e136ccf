use std::time::Duration;

use tracing::{debug, info};

use super::snake::SNAKE_COLOR;
use super::{Command, Direction, Food, Position, RandomSource, Renderer, Scheduler, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    GameOver,
}

/// Owns the whole game and drives it one tick at a time.
///
/// The controller never sleeps or reads a clock. After every tick that
/// leaves the game running it asks the scheduler for exactly one more
/// `tick()` call, so there is never more than one pending tick. Input goes
/// through [`Controller::handle`] and only changes what the next tick does.
pub struct Controller<R, T, S> {
    snake: Snake,
    food: Food,
    state: State,
    start: Position,
    period: Duration,
    tick_pending: bool,

    renderer: R,
    scheduler: T,
    rng: S,
}

impl<R, T, S> Controller<R, T, S>
where
    R: Renderer,
    T: Scheduler,
    S: RandomSource,
{
    pub fn new(renderer: R, scheduler: T, mut rng: S, start: Position, period: Duration) -> Self {
        let food = Food::new(&mut rng);

        let mut controller = Self {
            snake: Snake::new(start, SNAKE_COLOR),
            food,
            state: State::Running,
            start,
            period,
            tick_pending: false,
            renderer,
            scheduler,
            rng,
        };

        controller.schedule_next();
        controller.redraw();
        controller
    }

    #[cfg(test)]
    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == State::GameOver
    }

    #[cfg(test)]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub fn food(&self) -> &Food {
        &self.food
    }

    #[cfg(test)]
    pub fn is_tick_pending(&self) -> bool {
        self.tick_pending
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }

    pub fn handle(&mut self, cmd: Command) {
        match cmd.direction() {
            Some(dir) => self.turn(dir),
            None => self.restart(),
        }
    }

    /// Takes effect on the next tick.
    pub fn turn(&mut self, dir: Direction) {
        self.snake.set_direction(dir);
    }

    /// Timer entry point. Ticks that arrive after the game ended are dropped.
    pub fn tick(&mut self) {
        self.tick_pending = false;

        if self.state != State::Running {
            debug!("tick ignored, game is over");
            return;
        }

        if self.snake.advance(self.food.position()) {
            let next = self.food.relocate(&mut self.rng);
            debug!(
                score = self.snake.current_score(),
                length = self.snake.len(),
                food = ?next,
                "food eaten"
            );
        }

        if self.snake.boundary_collision() || self.snake.body_collision() {
            self.game_over();
        } else {
            self.schedule_next();
        }

        self.redraw();
    }

    /// Honored in both states. A tick already pending keeps its slot.
    pub fn restart(&mut self) {
        let was_over = self.is_game_over();

        self.snake.reset(self.start);
        self.snake.grow();
        self.food.relocate(&mut self.rng);
        self.state = State::Running;

        if !self.tick_pending {
            self.schedule_next();
        }

        info!(
            from_game_over = was_over,
            high_score = self.snake.high_score(),
            "game restarted"
        );

        self.redraw();
    }

    /// Pushes the current picture to the renderer.
    pub fn redraw(&mut self) {
        self.renderer.draw_scene(&self.snake, &self.food);
        self.renderer.draw_status(
            self.snake.current_score(),
            self.snake.high_score(),
            self.is_game_over(),
        );
    }

    fn game_over(&mut self) {
        info!(
            score = self.snake.current_score(),
            high_score = self.snake.high_score(),
            head = ?self.snake.head(),
            "game over"
        );

        self.snake.clear_score();
        self.state = State::GameOver;
    }

    fn schedule_next(&mut self) {
        self.scheduler.schedule(self.period);
        self.tick_pending = true;
    }

    #[cfg(test)]
    pub(crate) fn place_food(&mut self, pos: Position) {
        self.food = Food::at(pos);
    }

    #[cfg(test)]
    pub(crate) fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }
}
