use colored::control::set_override;
use env_logger::Builder;
use log::LevelFilter;

pub fn init_logging(verbose: bool, no_color: bool) {
    // Disable colors globally if requested
    if no_color {
        set_override(false);
    }

    Builder::new()
        .filter_level(level_filter(verbose))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn level_filter(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The logger can only be initialized once per process, so only the
    // level selection is tested here.

    #[test]
    fn level_filter_verbose_returns_debug() {
        assert_eq!(level_filter(true), LevelFilter::Debug);
    }

    #[test]
    fn level_filter_non_verbose_returns_info() {
        assert_eq!(level_filter(false), LevelFilter::Info);
    }
}
