//! Configuration for the cache and resolver.
//!
//! The configuration system supports:
//! - Bundled defaults (include_str! from tally.toml)
//! - User overrides (~/.config/tally/tally.toml, then ./tally.toml)
//! - Environment overrides (`TALLY_CACHE__VOLATILE_TTL_SECS=60`), read after
//!   loading a `.env` file if one exists

use crate::DEFAULT_THRESHOLD;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tally_cache::CacheConfig;
use tally_error::{ConfigError, TallyResult};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../tally.toml");

/// Resolution settings.
///
/// ```toml
/// [resolver]
/// default_threshold = 70
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct ResolutionConfig {
    /// Minimum score (0-100) used when a caller gives no threshold
    #[serde(default = "default_threshold")]
    default_threshold: u32,
}

fn default_threshold() -> u32 {
    u32::from(DEFAULT_THRESHOLD)
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            default_threshold: default_threshold(),
        }
    }
}

/// Top-level configuration.
///
/// # Example
///
/// ```no_run
/// use tally_resolver::ResolverConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ResolverConfig::load()?;
/// println!("friends TTL: {}s", config.cache().volatile_ttl_secs());
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct ResolverConfig {
    /// Cache TTLs per collection class
    #[serde(default)]
    cache: CacheConfig,

    /// Resolution settings
    #[serde(default)]
    resolver: ResolutionConfig,
}

impl ResolverConfig {
    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> TallyResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder().add_source(File::from(path.as_ref()));
        Self::build(builder)
    }

    /// Parse configuration from TOML text layered over the bundled defaults.
    pub fn from_toml_str(toml: &str) -> TallyResult<Self> {
        let builder = Self::defaults().add_source(File::from_str(toml, FileFormat::Toml));
        Self::build(builder)
    }

    /// Load configuration with precedence: environment > current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped when missing.
    #[instrument]
    pub fn load() -> TallyResult<Self> {
        debug!("Loading configuration: env > current dir > home dir > bundled defaults");

        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/tally/tally.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("tally").required(false))
            .add_source(Self::environment());

        Self::build(builder)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a threshold above 100 or a zero TTL.
    pub fn validate(&self) -> TallyResult<()> {
        self.default_threshold()?;
        if *self.cache.static_ttl_secs() == 0 || *self.cache.volatile_ttl_secs() == 0 {
            return Err(ConfigError::new("cache TTLs must be greater than zero").into());
        }
        Ok(())
    }

    /// The default threshold as a score floor.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the threshold is above 100.
    pub fn default_threshold(&self) -> TallyResult<u8> {
        u8::try_from(self.resolver.default_threshold)
            .ok()
            .filter(|t| *t <= 100)
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "resolver.default_threshold must be between 0 and 100, got {}",
                    self.resolver.default_threshold
                ))
                .into()
            })
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn environment() -> Environment {
        Environment::with_prefix("TALLY")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> TallyResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}
