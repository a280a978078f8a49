// recon/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recon")]
#[command(about = "Validates and extracts source/target data for reconciliation tests", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for `recon.yaml` / `RECON_*` locations.
#[derive(Args, Debug, Clone, Default)]
pub struct Locations {
    /// Environment settings file (JSON)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Directory holding the test case JSON files
    #[arg(long)]
    pub test_configs: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ✅ Checks every test case description (origins + column mapping)
    Check {
        #[command(flatten)]
        locations: Locations,
    },

    /// 📋 Lists discovered test cases
    List {
        #[command(flatten)]
        locations: Locations,
    },

    /// 📤 Exports source and target tables as CSV
    Export {
        #[command(flatten)]
        locations: Locations,

        /// Export only this test case
        #[arg(long, short)]
        test: Option<String>,

        /// Output directory (default: export-path from recon.yaml)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
