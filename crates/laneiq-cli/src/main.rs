use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

mod command;
mod util;

fn main() -> anyhow::Result<()> {
    setup_tracing_subscriber();
    command::run()
}

/// Logs go to stderr so stdout carries nothing but JSON.
fn setup_tracing_subscriber() {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_target(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(layer).with(filter).init();
}
