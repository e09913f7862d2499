//! Log setup for the `scribe` binary.

use env_logger::Env;
use log::LevelFilter;

/// Maps the `-v` count to a default level; `RUST_LOG` still wins when set.
pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(verbose: u8) {
    let default = level_for(verbose).as_str().to_ascii_lowercase();
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default))
        .format_timestamp_millis()
        .try_init();
}
