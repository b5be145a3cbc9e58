use crate::cli::args::OutputFormat;
use crate::commands::output_json;
use crate::error::Result;
use crate::packages::LanguageBackend;

pub fn run(backend: &dyn LanguageBackend, format: OutputFormat) -> Result<()> {
    let guessed = backend.guess()?;

    match format {
        OutputFormat::Json => output_json(&guessed),
        OutputFormat::Text => {
            for name in &guessed {
                println!("{}", name);
            }
            Ok(())
        }
    }
}
