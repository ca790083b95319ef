use log::LevelFilter;
use std::env;

/// Sets up `env_logger` for the command line tool.
///
/// Logs at `Info` by default and `Debug` when `debug` is set. An explicit
/// `RUST_LOG` takes precedence over both. Calling this more than once keeps
/// the first logger.
pub fn init_logger(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    if builder.try_init().is_ok() {
        log::debug!("logger initialized at {level:?} level");
    }
}
