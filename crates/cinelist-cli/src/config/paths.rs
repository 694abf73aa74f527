//! Config file location.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// Environment variable overriding the config directory.
const CONFIG_DIR_ENV: &str = "CINELIST_CONFIG_DIR";

/// Config file name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolves the config file path from the process environment.
///
/// `$CINELIST_CONFIG_DIR/config.toml` wins; otherwise
/// `~/.config/cinelist/config.toml`. Empty values count as unset.
///
/// # Errors
///
/// Returns an error if neither `CINELIST_CONFIG_DIR` nor `HOME` is set.
pub fn resolve_config_path() -> Result<PathBuf> {
    config_path_from(
        std::env::var_os(CONFIG_DIR_ENV),
        std::env::var_os("HOME"),
    )
}

/// Picks the config path from an override directory and a home directory.
fn config_path_from(config_dir: Option<OsString>, home: Option<OsString>) -> Result<PathBuf> {
    let non_empty = |value: Option<OsString>| value.filter(|v| !v.is_empty()).map(PathBuf::from);

    if let Some(dir) = non_empty(config_dir) {
        return Ok(dir.join(CONFIG_FILE_NAME));
    }
    let Some(home) = non_empty(home) else {
        bail!("neither {CONFIG_DIR_ENV} nor HOME is set");
    };
    Ok(home.join(".config").join("cinelist").join(CONFIG_FILE_NAME))
}
