use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;

/// Install the global fmt subscriber on stderr. `RUST_LOG` takes precedence over `level`.
pub fn init_tracing(level: &str) -> Result<(), ConfigError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level.trim()).map_err(|e| ConfigError::Invalid {
            key: "LOG_LEVEL",
            reason: e.to_string(),
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
