pub mod accept;
pub mod assign;
pub mod auth;
pub mod config;
pub mod events;

use chaperone_core::gateway::{oauth, OAuthConfig};
use chaperone_core::Config;

/// Load the config and check the pieces every calendar command needs.
pub(crate) fn configured() -> Result<Config, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    if config.calendar_id.is_empty() {
        return Err("no calendar configured; run `chaperone config set-calendar <id>`".into());
    }
    if config.google.client_id.is_empty() || config.google.client_secret.is_empty() {
        return Err(
            "Google client credentials not configured; run `chaperone config set-google <id> <secret>`"
                .into(),
        );
    }
    Ok(config)
}

/// Valid bearer credential for the configured Google client, refreshed if
/// needed.
pub(crate) async fn bearer(config: &Config) -> Result<String, Box<dyn std::error::Error>> {
    let oauth_config = OAuthConfig::google(&config.google.client_id, &config.google.client_secret);
    oauth::access_token(&oauth_config).await
}
