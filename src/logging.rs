use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// JSON logs to stdout; `RUST_LOG` overrides the default `info` filter.
pub fn init() {
    let fmt_layer = fmt::layer().json().with_target(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
