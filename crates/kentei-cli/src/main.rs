//! kentei CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kentei", version, about = "Weather-certification practice exam")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a timed exam
    Exam {
        /// Use a local pool file instead of fetching from the store
        #[arg(long)]
        pool: Option<PathBuf>,

        /// Store to fetch from (defaults to the configured default)
        #[arg(long)]
        store: Option<String>,

        /// Seed for a reproducible paper
        #[arg(long)]
        seed: Option<u64>,

        /// Shorten under-filled category blocks instead of failing
        #[arg(long)]
        lenient: bool,

        /// Session length in seconds (defaults to the configured limit)
        #[arg(long)]
        time_limit: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade the pending result
    Grade {
        /// Also print the per-question review
        #[arg(long)]
        review: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Post the pending result to the ranking
    Submit {
        /// Display name shown on the ranking (at most 20 characters)
        #[arg(long)]
        name: String,

        /// Store to post to (defaults to the configured default)
        #[arg(long)]
        store: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Drop the pending result without submitting it
    Discard {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the top scores
    Ranking {
        /// Store to query (defaults to the configured default)
        #[arg(long)]
        store: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Fetch the question pool and check it against the exam blueprint
    Fetch {
        /// Store to fetch from (defaults to the configured default)
        #[arg(long)]
        store: Option<String>,

        /// Save the fetched pool to a JSON file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a local pool file
    Validate {
        /// Path to a pool JSON file
        #[arg(long)]
        pool: PathBuf,
    },

    /// Assemble an exam paper from a local pool file
    Assemble {
        /// Path to a pool JSON file
        #[arg(long)]
        pool: PathBuf,

        /// Seed for a reproducible paper
        #[arg(long)]
        seed: Option<u64>,

        /// Shorten under-filled category blocks instead of failing
        #[arg(long)]
        lenient: bool,

        /// Save the assembled paper to a JSON file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Create starter config and a sample question pool
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kentei=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Exam {
            pool,
            store,
            seed,
            lenient,
            time_limit,
            config,
        } => commands::exam::execute(pool, store, seed, lenient, time_limit, config).await,
        Commands::Grade { review, config } => commands::grade::execute(review, config),
        Commands::Submit {
            name,
            store,
            config,
        } => commands::submit::execute(name, store, config).await,
        Commands::Discard { config } => commands::discard::execute(config),
        Commands::Ranking { store, config } => commands::ranking::execute(store, config).await,
        Commands::Fetch {
            store,
            output,
            config,
        } => commands::fetch::execute(store, output, config).await,
        Commands::Validate { pool } => commands::validate::execute(pool),
        Commands::Assemble {
            pool,
            seed,
            lenient,
            output,
        } => commands::assemble::execute(pool, seed, lenient, output),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
