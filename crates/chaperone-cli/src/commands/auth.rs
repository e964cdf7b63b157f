//! Google authentication management.

use clap::Subcommand;

use chaperone_core::gateway::{keyring_store, oauth, OAuthConfig};
use chaperone_core::Config;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Run the browser OAuth flow for Google Calendar
    Login,
    /// Remove stored tokens
    Logout,
    /// Check authentication status
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::Login => {
            let config = Config::load()?;
            if config.google.client_id.is_empty() || config.google.client_secret.is_empty() {
                return Err(
                    "Google client credentials not configured; run `chaperone config set-google <id> <secret>`"
                        .into(),
                );
            }
            let oauth_config =
                OAuthConfig::google(&config.google.client_id, &config.google.client_secret);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(oauth::authorize(&oauth_config))?;
            println!("Google authenticated");
        }
        AuthAction::Logout => {
            keyring_store::delete("google")?;
            println!("Google disconnected");
        }
        AuthAction::Status => {
            println!(
                "{}",
                if oauth::load_tokens("google").is_some() {
                    "authenticated"
                } else {
                    "not authenticated"
                }
            );
        }
    }
    Ok(())
}
