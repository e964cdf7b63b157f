//! Configuration management.

use clap::Subcommand;

use chaperone_core::config::data_dir;
use chaperone_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Set the shared calendar id
    SetCalendar { calendar_id: String },
    /// Replace the adult roster (comma-separated emails, in priority order)
    SetAdults { emails: String },
    /// Replace the kid roster (comma-separated names, in priority order)
    SetKids { names: String },
    /// Set the Google OAuth client credentials
    SetGoogle {
        client_id: String,
        client_secret: String,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", data_dir()?.join("config.toml").display());
        }
        ConfigAction::SetCalendar { calendar_id } => {
            let mut config = Config::load()?;
            config.calendar_id = calendar_id;
            config.save()?;
            println!("calendar id updated");
        }
        ConfigAction::SetAdults { emails } => {
            let mut config = Config::load()?;
            config.adult_emails = split_list(&emails);
            config.save()?;
            println!("adult roster: {} entr(ies)", config.adult_emails.len());
        }
        ConfigAction::SetKids { names } => {
            let mut config = Config::load()?;
            config.kid_names = split_list(&names);
            config.save()?;
            println!("kid roster: {} entr(ies)", config.kid_names.len());
        }
        ConfigAction::SetGoogle {
            client_id,
            client_secret,
        } => {
            let mut config = Config::load()?;
            config.google.client_id = client_id;
            config.google.client_secret = client_secret;
            config.save()?;
            println!("Google client credentials updated");
        }
    }
    Ok(())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
