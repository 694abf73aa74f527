//! Application configuration module.
//!
//! Reads the optional TOML config file holding TMDB request settings
//! (language, region, base URL). The API key is never read from it.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::resolve_config_path;
