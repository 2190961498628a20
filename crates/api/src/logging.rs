use shared::config::LogFormat;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// `RUST_LOG` wins over the built-in default.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize logging in the configured format
pub fn init(format: LogFormat) {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let fmt_layer = match format {
        LogFormat::Json => fmt_layer.json().boxed(),
        LogFormat::Pretty => fmt_layer.pretty().boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter())
        .init();

    tracing::info!(?format, "Logging initialized");
}
