//! Engine settings, read from an optional `inventory.toml` and `INVENTORY_*`
//! environment variables (which win over the file).
//!
//! ```toml
//! scope_id = "main-street"
//! channel_buffer = 64
//! ```

use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Active business scope for listing, production and imports.
    pub scope_id: String,
    /// Capacity of each actor's request channel.
    pub channel_buffer: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scope_id: "default".to_string(),
            channel_buffer: 32,
        }
    }
}

impl EngineConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name("inventory").required(false))
    }

    /// Settings from a TOML document, without reading the environment.
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("scope_id", defaults.scope_id)?
            .set_default("channel_buffer", defaults.channel_buffer as u64)?
            .add_source(File::from_str(document, FileFormat::Toml))
            .build()?;
        Self::checked(settings.try_deserialize()?)
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("scope_id", defaults.scope_id)?
            .set_default("channel_buffer", defaults.channel_buffer as u64)?
            .add_source(file)
            .add_source(Environment::with_prefix("INVENTORY"))
            .build()?;
        Self::checked(settings.try_deserialize()?)
    }

    fn checked(config: Self) -> Result<Self, ConfigError> {
        if config.channel_buffer == 0 {
            return Err(ConfigError::Message(
                "channel_buffer must be at least 1".to_string(),
            ));
        }
        if config.scope_id.trim().is_empty() {
            return Err(ConfigError::Message("scope_id must not be empty".to_string()));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config, EngineConfig::default());

        let config = EngineConfig::from_toml("scope_id = \"main-street\"").unwrap();
        assert_eq!(config.scope_id, "main-street");
        assert_eq!(config.channel_buffer, 32);
    }

    #[test]
    fn test_reads_both_keys() {
        let config =
            EngineConfig::from_toml("scope_id = \"cafe\"\nchannel_buffer = 8").unwrap();
        assert_eq!(
            config,
            EngineConfig {
                scope_id: "cafe".to_string(),
                channel_buffer: 8,
            }
        );
    }

    #[test]
    fn test_zero_buffer_is_refused() {
        assert!(EngineConfig::from_toml("channel_buffer = 0").is_err());
        assert!(EngineConfig::from_toml("scope_id = \" \"").is_err());
    }
}
