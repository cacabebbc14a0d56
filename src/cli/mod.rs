pub mod args;
pub mod runner;

pub use args::{count_verbose_flags, get_log_level_from_verbose, init_logger};
pub use runner::{run, Runner};
