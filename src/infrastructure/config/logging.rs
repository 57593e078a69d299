//! Logging configuration and initialization.

use serde::Deserialize;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::application::log_buffer::LogBuffer;
use crate::infrastructure::log_layer::LogBufferLayer;

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// `pretty` or `json`.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".into()
}

fn default_format() -> String {
    "pretty".into()
}

impl LoggingConfig {
    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence over the configured level. When `buffer`
    /// is given, every emitted event is also recorded there. Installing
    /// twice is a no-op.
    pub fn init(&self, buffer: Option<&LogBuffer>) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let (json, pretty) = if self.is_json() {
            (Some(fmt::layer().json()), None)
        } else {
            (None, Some(fmt::layer()))
        };

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(json)
            .with(pretty)
            .with(buffer.cloned().map(LogBufferLayer::new))
            .try_init();
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}
