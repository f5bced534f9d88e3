use clap::{CommandFactory, Parser};
use tldrs::config::expand::env_lookup;
use tldrs::config::{CliConfig, Config, Settings};
use tldrs::core::types::{ResolveOutcome, SyncReport};
use tldrs::logging;
use tldrs::resolve::Resolver;
use tldrs::sync::Syncer;
use tldrs::ui::output;
use tldrs::ui::{Cli, Commands, ProgressReporter, cli_to_config, print_completions};

use std::io;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run_tldr_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Some(Commands::CompletionGenerate { shell }) => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(0)
        }
        None => None,
    }
}

/// Pull if requested, then print every tldr found for the given names.
///
/// Only configuration and sync failures are errors; names without a match
/// still exit 0.
pub async fn run_tldr_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    logging::init_logger(config.verbose.unwrap_or(false), cli_config.quiet);

    let settings = Settings::assemble(cli_config.pull, &config, env_lookup);
    logging::log_settings(&settings);

    if settings.pull {
        let report = run_sync(&settings, &cli_config).await?;
        output::display_sync_summary(&report, &settings.cache_dir, cli_config.quiet);
    }

    resolve_names(&cli.names, &settings);
    Ok(0)
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        let (config, ignored) = Config::load_from_standard_locations(env_lookup);
        for (path, e) in &ignored {
            output::display_config_warning(path, e, cli_config.quiet);
        }
        config
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Refresh the cache directory from the remote listing
pub async fn run_sync(
    settings: &Settings,
    cli_config: &CliConfig,
) -> Result<SyncReport, Box<dyn std::error::Error>> {
    logging::log_sync_start(&settings.listing_url, &settings.cache_dir);

    let syncer = Syncer::from_settings(settings)?;
    let mut progress = ProgressReporter::for_terminal(!cli_config.quiet && !cli_config.no_progress);

    let report = syncer.sync(Some(&mut progress)).await.inspect_err(|e| {
        logging::log_error("Pull failed", Some(e));
    })?;
    Ok(report)
}

/// Stream every match to stdout; problems and the no-match hint go to stderr
pub fn resolve_names(names: &[String], settings: &Settings) -> ResolveOutcome {
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    Resolver::new(&settings.search_path).resolve(names, &mut out, &mut err)
}
