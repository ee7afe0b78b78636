//! Configuration loader

use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File, FileFormat};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::{ClientError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. `COINBASE_API_KEY` / `COINBASE_API_SECRET` / `COINBASE_REST_URL`
/// 2. Environment variables prefixed with `APP__` (e.g. `APP__TRADING__MAKER_FEE_RATE`)
/// 3. Configuration file (TOML format)
/// 4. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    );

    build(with_coinbase_env(builder)?)
}

/// Parse configuration from TOML text, without consulting the environment
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    build(Config::builder().add_source(File::from_str(contents, FileFormat::Toml)))
}

fn with_coinbase_env(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>> {
    [
        ("coinbase.api_key", "COINBASE_API_KEY"),
        ("coinbase.api_secret", "COINBASE_API_SECRET"),
        ("coinbase.rest_url", "COINBASE_REST_URL"),
    ]
    .into_iter()
    .try_fold(builder, |builder, (key, var)| {
        builder
            .set_override_option(key, std::env::var(var).ok())
            .map_err(|e| ClientError::Configuration(e.to_string()))
    })
}

fn build(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig> {
    let config = builder
        .build()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ClientError::Configuration(e.to_string()))
}
