//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod backend;
pub mod cache;
pub mod logging;
pub mod taxonomy;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::backend::BackendConfig;
use self::cache::CacheConfig;
use self::logging::LoggingConfig;
use self::taxonomy::TaxonomyConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides (`ARCHIVE__BACKEND__SITE_URL`).
pub const ENV_PREFIX: &str = "ARCHIVE";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (base file + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote list backend settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Sensitivity taxonomy settings.
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    /// Reference data cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Reads `base` (the file may be absent), then an overlay named
    /// `<dir of base>/<env>.toml` when `env` is given, then environment
    /// variables prefixed with `ARCHIVE__`.
    pub fn load(base: &str, env: Option<&str>) -> Result<Self, AppError> {
        let mut builder =
            config::Config::builder().add_source(config::File::with_name(base).required(false));

        if let Some(env) = env {
            let dir = Path::new(base)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let overlay = dir.join(env);
            builder = builder.add_source(
                config::File::with_name(&overlay.to_string_lossy()).required(false),
            );
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML string.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(AppError::from)
    }
}
