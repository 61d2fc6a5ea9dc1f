//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::{
    APP_NAME, CREDENTIAL_FILE_NAME, DEFAULT_BASE_URL, DEFAULT_CONFIG_FILE, DEFAULT_LOG_DIRECTORY,
    DEFAULT_LOG_FILE_PREFIX, DEFAULT_LOG_FILTER, ENV_PREFIX,
};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub session: SessionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    /// Attach the stored credential to `POST /api/products`.
    pub authorize_product_submission: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file_prefix: String,
    pub filter: String,
    pub json: bool,
}

impl Settings {
    /// Layering: defaults, then `config/shop-admin.*` (or `config_file` when
    /// given), then `SHOP_ADMIN__*` environment variables, then
    /// `base_url_override`.
    pub fn load(
        config_file: Option<&Path>,
        base_url_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.authorize_product_submission", false)?
            .set_default("session.path", default_session_path().to_string_lossy().as_ref())?
            .set_default("logging.directory", DEFAULT_LOG_DIRECTORY)?
            .set_default("logging.file_prefix", DEFAULT_LOG_FILE_PREFIX)?
            .set_default("logging.filter", DEFAULT_LOG_FILTER)?
            .set_default("logging.json", false)?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("api.base_url", base_url_override)?
            .build()?;

        config.try_deserialize()
    }
}

fn default_session_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home)
            .join(".config")
            .join(APP_NAME)
            .join(CREDENTIAL_FILE_NAME),
        None => PathBuf::from(format!(".{}", APP_NAME)).join(CREDENTIAL_FILE_NAME),
    }
}
