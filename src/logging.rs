//! Diagnostic logging setup
//!
//! Diagnostics go through the `log` facade to stderr so stdout stays
//! clean for reports, JSON and CSV. `RUST_LOG` overrides the level
//! derived from `-v` / `--quiet`.

/// Default filter for a verbosity count
pub fn default_filter(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr logger; safe to call once per process
pub fn init_logging(verbosity: u8, quiet: bool) {
    let env = env_logger::Env::default().default_filter_or(default_filter(verbosity, quiet));
    let _ = env_logger::Builder::from_env(env)
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(0, false), "warn");
        assert_eq!(default_filter(1, false), "info");
        assert_eq!(default_filter(2, false), "debug");
        assert_eq!(default_filter(7, false), "trace");
        assert_eq!(default_filter(3, true), "error");
    }
}
