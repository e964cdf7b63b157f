use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "chaperone", version, about = "Chaperone CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Event views: list, agenda, counts
    Events {
        #[command(subcommand)]
        action: commands::events::EventsAction,
    },
    /// Assign an adult to one or more events
    Assign {
        /// Event ids to assign
        #[arg(required = true)]
        event_ids: Vec<String>,
        /// Email of the adult to assign
        #[arg(long)]
        adult: String,
    },
    /// Accept an event invite as the given adult
    Accept {
        /// Event id to accept
        event_id: String,
        /// Email of the accepting adult
        #[arg(long)]
        email: String,
    },
    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Events { action } => commands::events::run(action),
        Commands::Assign { event_ids, adult } => commands::assign::run(&event_ids, &adult),
        Commands::Accept { event_id, email } => commands::accept::run(&event_id, &email),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
