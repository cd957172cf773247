use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::error::StartupError;

use super::options::LogOptions;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `--log-level`. Output is JSON unless
/// `--log-pretty` is set.
pub fn init(opts: &LogOptions) -> Result<(), StartupError> {
    let filter = filter(opts)?;
    let registry = Registry::default().with(filter);

    let res = if opts.log_pretty {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_ansi(opts.log_color),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().json().with_target(true).with_current_span(false))
            .try_init()
    };
    res.map_err(|e| StartupError::Logging(e.to_string()))
}

fn filter(opts: &LogOptions) -> Result<EnvFilter, StartupError> {
    let directives = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(env) if !env.trim().is_empty() => env,
        _ => opts.log_level.clone(),
    };
    EnvFilter::try_new(&directives).map_err(|e| StartupError::Logging(e.to_string()))
}
