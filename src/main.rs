mod constants;
mod data;
mod game;
mod graphics;
mod modes;

use anyhow::Result;
use clap::Parser;

use data::{Config, Program};
use modes::Mode;

fn main() -> Result<()> {
    let cfg = Config::parse();
    let prog = Program::from_config(&cfg)?;

    data::log::init(&prog);

    match prog.mode() {
        Mode::Win => modes::windowed_mode::winit_main(prog),

        #[cfg(feature = "terminal")]
        Mode::ConBlock | Mode::ConAscii => modes::console_mode::con_main(prog),

        #[cfg(not(feature = "terminal"))]
        other => anyhow::bail!("{} mode is not available in this build", other.get_name()),
    }
}
