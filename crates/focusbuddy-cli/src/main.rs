use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "focusbuddy", version, about = "FocusBuddy focus timer")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive focus timer
    Run,
    /// Show level, XP and streak
    Status {
        /// Print the full state snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Diagnostics for checking progress rules without waiting
    #[command(hide = true)]
    Debug {
        #[command(subcommand)]
        action: commands::debug::DebugAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("FOCUSBUDDY_LOG").unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run => commands::run::run(),
        Commands::Status { json } => commands::status::run(json),
        Commands::Debug { action } => commands::debug::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
