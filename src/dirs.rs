use std::path::PathBuf;

/// Returns the base directory for relay data.
///
/// Uses `$CONCIERGE_RELAY_HOME` if set, otherwise defaults to `~/.concierge/relay`.
pub fn relay_home() -> PathBuf {
    if let Ok(home) = std::env::var("CONCIERGE_RELAY_HOME") {
        return PathBuf::from(home);
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".concierge")
        .join("relay")
}

/// Returns the path to the user configuration file.
pub fn config_path() -> PathBuf {
    relay_home().join("config.toml")
}

/// Ensure all required directories exist.
pub fn ensure_dirs() -> std::io::Result<()> {
    std::fs::create_dir_all(relay_home())
}
