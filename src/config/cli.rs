use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "profile-feed")]
#[command(about = "Serves an aggregated ORCID + Medium profile as JSON")]
pub struct CliArgs {
    #[arg(long, help = "Path to a TOML settings file")]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "127.0.0.1:8787")]
    pub bind: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
