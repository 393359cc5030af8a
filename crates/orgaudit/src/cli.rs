//! CLI argument structure using clap

use clap::Parser;
use orgaudit_core::config::consts;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "orgaudit")]
#[command(version, about = "Report who can access which repository across GitHub organizations", long_about = None)]
pub struct Cli {
    /// GitHub personal access token (prompted for when absent)
    #[arg(short, long, env = consts::credential::TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// Path of the CSV report
    #[arg(short, long, default_value = consts::report::DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Organizations to audit instead of the token's memberships
    #[arg(long = "org", visible_alias = "organizations", num_args = 1.., value_name = "ORG")]
    pub organizations: Vec<String>,

    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}
