use clap::Parser;
use tracing::{info, warn};

use crate::constants::DEFAULT_TICK_MS;
use crate::data::{Program, DEFAULT_FPS, DEFAULT_WIN_SCALE};
use crate::modes::Mode;

#[derive(Parser, Debug, Clone)]
#[command(name = "gridsnake", version)]
#[command(about = "Grid snake in a window or in the terminal")]
pub struct Config {
    /// Front end to run
    #[arg(long, value_enum, default_value_t = Mode::Win)]
    pub mode: Mode,

    /// Window pixel scale, 1 to 4
    #[arg(long, default_value_t = DEFAULT_WIN_SCALE)]
    pub scale: u8,

    /// Milliseconds between game ticks
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Terminal redraw rate
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Fixed seed for food placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable logging
    #[arg(long)]
    pub quiet: bool,
}

impl Program {
    pub fn print_startup_info(&self) {
        info!(
            "starting gridsnake: mode={} tick={}ms",
            self.mode().get_name(),
            self.tick().as_millis()
        );

        match self.seed() {
            Some(seed) => info!("food seed: {seed}"),
            None => info!("food seed: from entropy"),
        }

        if self.mode().is_con() {
            info!("terminal refresh rate: {}hz", self.fps());
        } else {
            let (w, h) = self.window_size();
            info!("window size: {w}x{h} (scale {})", self.scale());
        }

        if self.tick() < self.frame_interval() {
            warn!("tick period is shorter than a frame, some ticks will be drawn late");
        }
    }
}
