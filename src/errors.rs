use color_eyre::{config::HookBuilder, eyre::Result};
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the report and panic hooks. Must run before anything can fail.
pub fn install_hooks() -> Result<()> {
    HookBuilder::default()
        .display_env_section(false)
        .install()
}

/// Logs go to stderr so the output can be piped. `RUST_LOG` takes precedence
/// over the verbosity flags.
pub fn install_logging(verbosity: u8, quiet: bool) -> Result<()> {
    let level = match (quiet, verbosity) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}
