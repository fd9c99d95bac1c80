//! jugo CLI - juiciness analysis and texture synthesis from the command line.

mod chain;
mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jugo")]
#[command(author, version, about = "Juiciness analysis and material texture toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process an audio file through a metered effect chain
    Process(commands::process::ProcessArgs),

    /// Score the juiciness of an audio file
    Analyze(commands::analyze::AnalyzeArgs),

    /// Generate test signals
    Generate(commands::generate::GenerateArgs),

    /// List available effects and their parameters
    Effects(commands::effects::EffectsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Effects(args) => commands::effects::run(args),
    }
}
