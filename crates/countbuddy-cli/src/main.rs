//! countbuddy CLI: play the counting games and manage child profiles.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "countbuddy", version, about = "Counting games for young learners")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List saved profiles and their play counts
    Profiles {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a new child profile
    CreateProfile {
        /// Child's name
        #[arg(long)]
        name: String,

        /// Child's age
        #[arg(long)]
        age: Option<u32>,

        /// Avatar symbol or name (smile, star, lion, butterfly, rainbow, turtle, blossom, balloon)
        #[arg(long)]
        avatar: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Play a game in the terminal
    Play {
        /// Profile id or name
        #[arg(long)]
        profile: String,

        /// Game: counting, tap-count, match-number, missing-number
        #[arg(long)]
        game: String,

        /// Seed for reproducible rounds
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run the progress record service
    Serve {
        /// Address to listen on (overrides config)
        #[arg(long)]
        bind: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("countbuddy=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Profiles { config } => commands::profiles::execute(config),
        Commands::CreateProfile {
            name,
            age,
            avatar,
            config,
        } => commands::create_profile::execute(name, age, avatar, config),
        Commands::Play {
            profile,
            game,
            seed,
            config,
        } => commands::play::execute(profile, game, seed, config).await,
        Commands::Serve { bind, config } => commands::serve::execute(bind, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
