//! Logging setup for bncnode.
//!
//! Library crates only emit `tracing` events. Binaries pick an output format
//! once at startup through one of the `init_*` functions.

pub use tracing::{debug, error, info, instrument, trace, warn, Level};
pub use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable single-line output
    #[default]
    Text,
    /// Structured JSON, one object per event
    Json,
}

/// Initialize the global subscriber from `RUST_LOG`, falling back to `info`
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    init_with_filter(filter, LogFormat::Text)
}

/// Initialize tracing with a specific level filter and output format
pub fn init_tracing_with_level(
    level: &str,
    format: LogFormat,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_with_filter(EnvFilter::try_new(level)?, format)
}

/// Initialize tracing for testing with simplified output
pub fn init_tracing_test() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(EnvFilter::new("debug"))
        .with(fmt::layer().with_test_writer())
        .try_init()?;

    Ok(())
}

fn init_with_filter(
    filter: EnvFilter,
    format: LogFormat,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // stderr keeps stdout clean for command output
    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .try_init()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_macros() {
        info!("Test info message");
        debug!("Test debug message");
        warn!("Test warning message");
        error!("Test error message");
    }

    #[test]
    fn test_default_format_is_text() {
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }

    #[test]
    #[tracing::instrument]
    fn test_instrument_attribute() {
        info!("This function is instrumented");
    }
}
