use crate::config::RelayConfig;
use crate::error::Result;

/// Execute the `config` command: print the effective configuration.
/// Secret values are elided, not printed.
pub fn execute() -> Result<()> {
    let mut config = RelayConfig::load()?;

    config.agent.client_secret = elide(&config.agent.client_secret);
    config.video.api_key = elide(&config.video.api_key);
    config.verify.secret = elide(&config.verify.secret);

    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn elide(secret: &str) -> String {
    if secret.is_empty() {
        "(unset)".to_string()
    } else {
        "(set)".to_string()
    }
}
