// recon/src/main.rs

mod cli;
mod commands;

use clap::Parser;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> miette::Result<()> {
    // RUST_LOG=debug recon check ... to see the details
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { locations } => commands::check::execute(locations).await,
        Commands::List { locations } => commands::list::execute(locations),
        Commands::Export {
            locations,
            test,
            out,
        } => commands::export::execute(locations, test, out),
    }
}
