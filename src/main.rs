use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use protonug::commands;

#[derive(Parser)]
#[clap(name = "protonug")]
#[clap(about = "An installer/updater for the GE (GloriousEggroll) custom Steam Proton builds")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Update the GE Proton build
    Update {
        /// Remove the older existing GE Proton builds
        #[clap(short, long)]
        clean: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Update { clean } => commands::update::update(clean)
            .await
            .map_err(|e| anyhow::anyhow!(e)),
    };

    if let Err(e) = result {
        eprintln!("\nError: {e}");
        std::process::exit(1);
    }

    Ok(())
}
