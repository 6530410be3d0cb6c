//! Layered application configuration.
//!
//! Sources, lowest to highest precedence:
//!
//! 1. Bundled defaults (include_str! from polyglot.toml)
//! 2. `~/.config/polyglot/polyglot.toml` (optional)
//! 3. `./polyglot.toml` (optional), or an explicit file (required)
//! 4. `POLYGLOT__<SECTION>__<KEY>` environment variables

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use polyglot_core::TutorPrompt;
use polyglot_error::{ConfigError, ConfigErrorKind, ServerError, ServerErrorKind};
use polyglot_retry::FallbackConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../polyglot.toml");

/// Environment variable prefix for overrides.
const ENV_PREFIX: &str = "POLYGLOT";

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ServerSettings {
    /// Socket address to listen on
    bind: String,
}

impl ServerSettings {
    /// Parse the bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigErrorKind::Invalid`] if `bind` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|e| ConfigError::invalid("server.bind", format!("{}: {}", self.bind, e)))
    }
}

/// Model provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ProviderSettings {
    /// Name of the environment variable holding the API key
    api_key_env: String,
}

/// Prompt template settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PromptSettings {
    /// File replacing the bundled tutor instructions
    #[serde(default)]
    template_path: Option<PathBuf>,
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PolyglotConfig {
    /// HTTP listener
    server: ServerSettings,
    /// Model provider
    provider: ProviderSettings,
    /// Model order, passes and backoff
    #[serde(default)]
    fallback: FallbackConfig,
    /// Tutor instructions
    #[serde(default)]
    prompt: PromptSettings,
}

impl PolyglotConfig {
    /// Load configuration from every layer.
    ///
    /// When `explicit` is given it replaces `./polyglot.toml` and must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read, the merged result does not
    /// deserialize, or the fallback settings are invalid.
    #[instrument(name = "polyglot_config_load")]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        debug!("Loading configuration with precedence: env > explicit/current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/polyglot/polyglot.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = match explicit {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("polyglot").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("fallback.models")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Bundled defaults overlaid with a TOML document.
    ///
    /// # Errors
    ///
    /// As [`load`](Self::load).
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::finish(Self::defaults().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Load(e.to_string())))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))?;

        config.validate()?;
        info!(
            bind = %config.server.bind,
            models = ?config.fallback.models(),
            max_passes = *config.fallback.max_passes(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.bind_addr()?;
        if self.provider.api_key_env.trim().is_empty() {
            return Err(ConfigError::invalid(
                "provider.api_key_env",
                "must name an environment variable",
            ));
        }
        self.fallback.validate()
    }

    /// Replace the bind address, e.g. from a command-line flag.
    ///
    /// # Errors
    ///
    /// Returns an error if `bind` is not a socket address.
    pub fn with_bind(mut self, bind: impl Into<String>) -> Result<Self, ConfigError> {
        self.server.bind = bind.into();
        self.server.bind_addr()?;
        Ok(self)
    }

    /// Build the tutor prompt, reading the template file if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ServerErrorKind::Template`] if the file cannot be read.
    pub fn tutor_prompt(&self) -> Result<TutorPrompt, ServerError> {
        match &self.prompt.template_path {
            None => Ok(TutorPrompt::default()),
            Some(path) => {
                let template = std::fs::read_to_string(path).map_err(|e| {
                    ServerError::new(ServerErrorKind::Template(format!(
                        "{}: {}",
                        path.display(),
                        e
                    )))
                })?;
                debug!(path = %path.display(), "Loaded prompt template");
                Ok(TutorPrompt::new(template))
            }
        }
    }
}
