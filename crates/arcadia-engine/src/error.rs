//! Error types for the demo engine binary.

use arcadia_heroine::HeroineError;

use crate::config::ConfigError;

/// Top-level error that `main` propagates with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The heroine could not be built or stepped.
    #[error("heroine error: {source}")]
    Heroine {
        /// The underlying heroine error.
        #[from]
        source: HeroineError,
    },
}
