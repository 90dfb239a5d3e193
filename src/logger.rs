/// Initializes `env_logger`. Resolution steps are logged at debug level, so
/// `verbose` is what makes them visible.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();
}
