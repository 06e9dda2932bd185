//! Diagnostic logging setup.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Map the `-v` count and `-q` flag to a maximum level.
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install a stderr fmt subscriber. Stdout stays reserved for command output.
pub fn init(verbose: u8, quiet: bool) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_for(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: a global logger was already installed");
    }
}
