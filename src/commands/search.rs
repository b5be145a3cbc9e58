//! Package search command

use crate::cli::args::OutputFormat;
use crate::commands::output_json;
use crate::error::Result;
use crate::packages::LanguageBackend;
use crate::ui as output;
use colored::Colorize;

pub fn run(backend: &dyn LanguageBackend, queries: &[String], format: OutputFormat) -> Result<()> {
    let results = backend.search(queries)?;

    if format == OutputFormat::Json {
        return output_json(&results);
    }

    if results.is_empty() {
        output::info(&format!("No packages found for '{}'", queries.join(" ")));
        return Ok(());
    }

    for pkg in &results {
        let mut line = format!("{}", pkg.name.cyan().bold());
        if !pkg.version.is_empty() {
            line.push_str(&format!(" {}", pkg.version.green()));
        }
        if !pkg.description.is_empty() {
            line.push_str(&format!(" - {}", pkg.description));
        }
        println!("{}", line);
    }

    Ok(())
}
