use crate::config::RelayConfig;
use crate::error::Result;
use crate::server;
use crate::session::SessionStore;

/// Execute `session show`: print the stored record for a user.
pub async fn show(user_id: &str) -> Result<()> {
    let config = RelayConfig::load()?;
    let store = server::build_store(&config).await?;

    match store.load(user_id).await? {
        Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
        None => println!("No session record for '{user_id}'"),
    }
    Ok(())
}

/// Execute `session clear`: delete the stored record for a user.
pub async fn clear(user_id: &str) -> Result<()> {
    let config = RelayConfig::load()?;
    let store = server::build_store(&config).await?;

    store.delete(user_id).await?;
    println!("Cleared session record for '{user_id}'");
    Ok(())
}
