use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "phishguard")]
#[command(author, version, about = "Classify email text as phishing or safe")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "phishguard.yaml", env = "PHISHGUARD_CONFIG")]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered models
    Models,

    /// Analyze one email
    Analyze {
        /// Model name (overrides default_model)
        #[arg(short, long)]
        model: Option<String>,

        /// Email text
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Plain-text (.txt) file holding the email
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Write an analysis report to this path
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
}
