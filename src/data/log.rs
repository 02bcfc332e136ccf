use tracing_subscriber::filter::EnvFilter;

use crate::data::Program;

/// Installs the stderr subscriber. Nothing is installed in quiet or terminal
/// runs, which leaves every `tracing` macro a no-op.
pub fn init(prog: &Program) {
    if !log_enabled(prog) {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn log_enabled(prog: &Program) -> bool {
    !(prog.is_quiet() || prog.mode().is_con())
}
