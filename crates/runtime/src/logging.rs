//! Log subscriber setup for hosts embedding the plugin.
//!
//! Defaults to `info`; `RUST_LOG` adds or overrides directives
//! (e.g. `RUST_LOG=sheet_runtime=debug` to see widget lifecycles).
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::TryInitError;

fn filter() -> EnvFilter {
    EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
}

/// Install a stderr fmt subscriber. Panics if one is already installed.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Like [`init`], but reports an already-installed subscriber instead of panicking.
pub fn try_init() -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
