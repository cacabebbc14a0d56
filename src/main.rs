use mycli::{
    cli::{count_verbose_flags, get_log_level_from_verbose, init_logger, run},
    error::default_error_handler,
};

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    init_logger(get_log_level_from_verbose(count_verbose_flags(argv.as_slice())));

    if let Err(err) = run(argv) {
        default_error_handler(err);
    }
}
