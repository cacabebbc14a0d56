use crate::constants::{env, verbosity};
use log::LevelFilter;

const VERBOSE_FLAG: &str = "--verbose";

/// Counts `--verbose` occurrences ahead of full parsing, so logging is configured
/// before plugins are loaded. Tokens after `--` are not flags.
pub fn count_verbose_flags<S: AsRef<str>>(argv: &[S]) -> u8 {
    let count = argv
        .iter()
        .skip(1)
        .map(|token| token.as_ref())
        .take_while(|token| *token != "--")
        .filter(|token| *token == VERBOSE_FLAG)
        .count();
    u8::try_from(count).unwrap_or(u8::MAX)
}

/// Map `--verbose` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}

/// Initializes env_logger; `MYCLI_LOG` takes precedence over the verbosity level.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env(env::LOG)
        .format_timestamp(None)
        .init();
}
