#[cfg(feature = "terminal")]
pub mod console_mode;

pub mod windowed_mode;

use clap::ValueEnum;

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, ValueEnum)]
pub enum Mode {
    #[default]
    Win,
    #[value(name = "block")]
    ConBlock,
    #[value(name = "ascii")]
    ConAscii,
}

impl Mode {
    pub fn get_name(&self) -> &'static str {
        match self {
            Mode::Win => "window",
            Mode::ConBlock => "block",
            Mode::ConAscii => "ascii",
        }
    }

    /// Cycles between the terminal styles. The window mode stays put.
    pub fn next(self) -> Self {
        match self {
            Mode::ConBlock => Mode::ConAscii,
            Mode::ConAscii => Mode::ConBlock,
            Mode::Win => Mode::Win,
        }
    }

    pub fn is_con(&self) -> bool {
        matches!(self, Mode::ConBlock | Mode::ConAscii)
    }
}
