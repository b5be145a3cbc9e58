//! Command dispatcher
//!
//! Routes CLI commands to their appropriate handlers.

mod normalization;

use crate::cli::args::{Cli, Command};
use crate::commands;
use crate::config::Config;
use crate::error::Result;
use crate::packages::BackendRegistry;
use crate::ui as output;
use std::path::Path;

pub use normalization::{parse_names, parse_package_specs};

/// Dispatch the parsed CLI command to the appropriate handler
pub fn dispatch(args: &Cli, config: &Config, root: &Path) -> Result<()> {
    let registry = BackendRegistry::with_defaults(config, root);
    let format = args.global.format;

    if let Command::ListLanguages = args.command {
        return commands::language::list_languages(&registry, format);
    }

    let language = args
        .global
        .language
        .as_deref()
        .or(config.language.as_deref());
    let backend = registry.get_backend(language)?;
    output::verbose(&format!("using backend {}", backend.name()));

    match &args.command {
        Command::ListLanguages => unreachable!("handled before backend resolution"),
        Command::WhichLanguage => commands::language::which_language(backend),
        Command::ShowSpecfile => commands::language::show_specfile(backend),
        Command::ShowLockfile => commands::language::show_lockfile(backend),
        Command::Search { queries } => commands::search::run(backend, queries, format),
        Command::Info { package } => commands::info::run(backend, package, format),
        Command::Add { packages } => commands::add::run(backend, &parse_package_specs(packages)),
        Command::Remove { packages } => commands::remove::run(backend, &parse_names(packages)),
        Command::Lock => commands::install::lock(backend),
        Command::Install => commands::install::install(backend),
        Command::List { lock } => commands::list::run(backend, *lock, format),
        Command::Guess => commands::guess::run(backend, format),
    }
}
