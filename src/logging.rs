use tracing_subscriber::EnvFilter;

/// `RUST_LOG` takes precedence; otherwise `debug` when verbose, `warn` when not.
pub fn filter_for(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "warn,videofeatures=debug"
        } else {
            "warn"
        })
    })
}

pub fn init_tracing(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose))
        .with_writer(std::io::stderr)
        .try_init();
}
