use crate::config::Config;
use anyhow::Context;
use tracing_subscriber::{
    filter::{
        EnvFilter,
        LevelFilter,
    },
    layer::SubscriberExt,
};

/// Make the filter for the given config.
///
/// Without a configured directive, everything at `INFO` and above is shown.
fn make_env_filter(config: &Config) -> anyhow::Result<EnvFilter> {
    match config.log_filter() {
        Some(directives) => {
            EnvFilter::try_new(directives).context("failed to parse log filter directives")
        }
        None => Ok(EnvFilter::default().add_directive(LevelFilter::INFO.into())),
    }
}

/// Try to setup a logger.
///
/// Results go to the stdout, so logs only ever go to the stderr.
pub fn setup(config: &Config) -> anyhow::Result<()> {
    let env_filter = make_env_filter(config)?;
    let stderr_formatting_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let subscriber = tracing_subscriber::Registry::default()
        .with(env_filter)
        .with(stderr_formatting_layer);

    tracing::subscriber::set_global_default(subscriber).context("failed to set subscriber")?;

    Ok(())
}
