use crate::cli::args::OutputFormat;
use crate::commands::output_json;
use crate::error::Result;
use crate::packages::{BackendRegistry, LanguageBackend};

pub fn list_languages(registry: &BackendRegistry, format: OutputFormat) -> Result<()> {
    let names = registry.names();
    match format {
        OutputFormat::Json => output_json(&names),
        OutputFormat::Text => {
            for name in names {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

pub fn which_language(backend: &dyn LanguageBackend) -> Result<()> {
    println!("{}", backend.name());
    Ok(())
}

pub fn show_specfile(backend: &dyn LanguageBackend) -> Result<()> {
    println!("{}", backend.specfile());
    Ok(())
}

pub fn show_lockfile(backend: &dyn LanguageBackend) -> Result<()> {
    println!("{}", backend.lockfile());
    Ok(())
}
