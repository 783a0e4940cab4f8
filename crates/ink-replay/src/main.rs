//! ink-replay: headless replay of recorded mesh-authoring sessions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod devices;
mod error;
mod script;

#[derive(Parser)]
#[command(name = "ink-replay")]
#[command(version, about = "Replay recorded input through the ink mesh builder and export STL")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a script and export the mesh.
    Run {
        /// Path to the input script (RON).
        script: PathBuf,

        /// Builder configuration (RON); defaults are used when absent.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory the STL file is written to.
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Write ASCII STL instead of binary.
        #[arg(long)]
        ascii: bool,
    },

    /// Write the default builder configuration.
    DefaultConfig {
        /// Destination file.
        path: PathBuf,
    },
}

fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ink_core=debug,ink_replay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            script,
            config,
            out,
            ascii,
        } => commands::run(&script, config.as_deref(), &out, ascii).map(|summary| {
            println!("{summary}");
        }),
        Commands::DefaultConfig { path } => commands::default_config(&path),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
