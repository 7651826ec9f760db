//! CLI command implementations.

pub mod cart;

use std::path::PathBuf;

use rocketshoes_storefront::config::{ConfigError, StorefrontConfig, parse_base_url};
use rocketshoes_storefront::state::StateError;
use thiserror::Error;

/// Errors that stop a command before it reaches the cart.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application state could not be built.
    #[error("Startup error: {0}")]
    State(#[from] StateError),

    /// A command-line override is invalid.
    #[error("Invalid --{flag}: {message}")]
    InvalidFlag {
        flag: &'static str,
        message: String,
    },
}

/// Global flags that take precedence over environment configuration.
#[derive(Debug, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub storage_dir: Option<PathBuf>,
}

impl Overrides {
    /// Load configuration from the environment and apply the overrides.
    pub fn load_config(&self) -> Result<StorefrontConfig, CommandError> {
        let mut config = StorefrontConfig::from_env()?;
        self.apply(&mut config)?;
        Ok(config)
    }

    fn apply(&self, config: &mut StorefrontConfig) -> Result<(), CommandError> {
        if let Some(raw) = &self.api_url {
            let base_url = parse_base_url(raw).map_err(|message| CommandError::InvalidFlag {
                flag: "api-url",
                message,
            })?;
            config.api.base_url = base_url;
        }
        if let Some(dir) = &self.storage_dir {
            config.storage.dir.clone_from(dir);
        }
        Ok(())
    }
}
