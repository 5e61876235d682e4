/// Installs a `tracing` subscriber printing to stderr, so that
/// [`TracingSink`](crate::diagnostics::TracingSink) output becomes visible.
///
/// `RUST_LOG` takes precedence over the built-in `smithy_wire=info` filter.
#[cfg(feature = "logging")]
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("smithy_wire=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
