//! kuaidu: chunked speed reading in the terminal

use anyhow::Result;
use clap::Parser;
use kuaidu_cli::commands::{Commands, ListCommands};

/// Split text into reading chunks and play them back at a set pace
#[derive(Debug, Parser)]
#[command(name = "kuaidu", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chunk(args) => args.execute(),
        Commands::Read(args) => args.execute(),
        Commands::List { subcommand } => {
            match subcommand {
                ListCommands::Modes => kuaidu_cli::commands::list_modes(),
                ListCommands::Formats => kuaidu_cli::commands::list_formats(),
            }
            Ok(())
        }
        Commands::GenerateConfig(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
    }
}
