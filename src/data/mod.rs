pub mod config;
pub mod log;
pub mod timer;

use std::time::Duration;

use anyhow::{bail, Result};
use rand::{rngs::StdRng, SeedableRng};

use crate::constants::{START_X, START_Y, VIEW_SIZE};
use crate::game::{Controller, Position, Renderer};
use crate::modes::Mode;

pub use config::Config;
pub use timer::TickTimer;

pub const DEFAULT_WIN_SCALE: u8 = 1;
pub const MAX_SCALE_FACTOR: u8 = 4;
pub const DEFAULT_FPS: u32 = 60;

/// A game wired to a real clock and a real random source.
pub type Game<R> = Controller<R, TickTimer, StdRng>;

/// Validated runtime settings shared by both front ends.
#[derive(Debug, Clone)]
pub struct Program {
    mode: Mode,
    scale: u8,
    tick: Duration,
    fps: u32,
    seed: Option<u64>,
    quiet: bool,
}

impl Program {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        if cfg.scale == 0 || cfg.scale > MAX_SCALE_FACTOR {
            bail!(
                "scale must be between 1 and {MAX_SCALE_FACTOR}, got {}",
                cfg.scale
            );
        }

        if cfg.tick_ms == 0 {
            bail!("tick period must be larger than 0 ms");
        }

        if cfg.fps == 0 {
            bail!("fps must be larger than 0");
        }

        if cfg.mode.is_con() && !cfg!(feature = "terminal") {
            bail!(
                "{} mode needs the `terminal` feature, rebuild with --features terminal",
                cfg.mode.get_name()
            );
        }

        Ok(Self {
            mode: cfg.mode,
            scale: cfg.scale,
            tick: Duration::from_millis(cfg.tick_ms),
            fps: cfg.fps,
            seed: cfg.seed,
            quiet: cfg.quiet,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.fps as u64)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Window inner size in physical pixels.
    pub fn window_size(&self) -> (u32, u32) {
        let side = VIEW_SIZE as u32 * self.scale as u32;
        (side, side)
    }

    /// Random source for food placement, fixed when a seed was given.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Starts a fresh game drawing into `renderer`. The first tick is due
    /// one period from now.
    pub fn new_game<R: Renderer>(&self, renderer: R) -> Game<R> {
        Controller::new(
            renderer,
            TickTimer::new(),
            self.rng(),
            Position::new(START_X, START_Y),
            self.tick,
        )
    }
}
