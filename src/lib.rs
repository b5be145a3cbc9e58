pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod error_suggestions;
pub mod packages;
pub mod project_identity;
pub mod ui;
pub mod utils;

use clap::Parser;
use error_suggestions::ErrorSuggestions;
use std::process::exit;

/// Run upm CLI entrypoint.
pub fn run_cli() {
    // 0. Initialize color settings (must be first)
    ui::init_colors();

    // 1. Parse arguments and configuration
    let args = cli::args::Cli::parse();
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    let config = config::Config::from_env();

    let root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            ui::error(&format!("cannot determine working directory: {}", e));
            exit(1);
        }
    };

    // 2. Run exactly one backend operation
    if let Err(e) = cli::dispatcher::dispatch(&args, &config, &root) {
        ui::error(&e.display_with_suggestion());
        exit(1);
    }
}
