use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match (verbose, level) {
        (true, _) => EnvFilter::new("mobile_spec_etl=debug,info"),
        (false, Some(level)) => EnvFilter::new(format!("mobile_spec_etl={}", level)),
        (false, None) => EnvFilter::new("mobile_spec_etl=info"),
    })
}

pub fn init_cli_logger(verbose: bool) {
    init_logger(verbose, None, false);
}

/// `RUST_LOG` always wins over `verbose` and `level`.
pub fn init_logger(verbose: bool, level: Option<&str>, json: bool) {
    let filter = default_filter(verbose, level);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .json(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init();
    }
}
