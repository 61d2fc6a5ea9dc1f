//! Application-wide constants

pub const APP_NAME: &str = "shop-admin";
pub const ENV_PREFIX: &str = "SHOP_ADMIN";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_CONFIG_FILE: &str = "config/shop-admin";
pub const CREDENTIAL_FILE_NAME: &str = "credential";
pub const DEFAULT_LOG_DIRECTORY: &str = "logs";
pub const DEFAULT_LOG_FILE_PREFIX: &str = "shop-admin.log";
pub const DEFAULT_LOG_FILTER: &str = "info,shop_admin=debug";
