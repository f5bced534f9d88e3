// Command-line interface definitions and parsing for tldr

use crate::config::CliConfig;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tldr", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Names of the tldrs to print
    pub names: Vec<String>,

    // Sync
    /// Pull tldrs from the remote repository into the pull directory first
    #[arg(short = 'p', long, help_heading = "Sync")]
    pub pull: bool,

    /// Directory to put tldrs in when pulling (default: $HOME/.local/share/tldr)
    #[arg(long, value_name = "DIR", help_heading = "Sync")]
    pub pull_dir: Option<String>,

    /// Endpoint listing the remote tldrs
    #[arg(long, value_name = "URL", help_heading = "Sync")]
    pub listing_url: Option<String>,

    /// HTTP timeout in seconds (default: none)
    #[arg(short = 't', long, value_name = "SECONDS", help_heading = "Sync")]
    pub timeout: Option<u64>,

    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Sync")]
    pub user_agent: Option<String>,

    /// Stop pulling at the first tldr that fails to download
    #[arg(long, help_heading = "Sync")]
    pub fail_fast: bool,

    // Lookup
    /// Colon separated directories to look for tldrs in (default: $HOME/.tldr:(pull-dir))
    #[arg(long, value_name = "PATHS", help_heading = "Lookup")]
    pub paths: Option<String>,

    // Output & Verbosity
    /// Suppress the pull summary and progress
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable progress bars
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration", conflicts_with = "config")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Convert the parsed CLI into the options layered over the config file
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        pull: cli.pull,
        pull_dir: cli.pull_dir.clone(),
        listing_url: cli.listing_url.clone(),
        timeout: cli.timeout,
        user_agent: cli.user_agent.clone(),
        fail_fast: cli.fail_fast,
        paths: cli.paths.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_progress: cli.no_progress,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
