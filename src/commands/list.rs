use crate::cli::args::OutputFormat;
use crate::commands::output_json;
use crate::error::Result;
use crate::packages::LanguageBackend;
use crate::ui as output;
use std::fmt::Display;

pub fn run(backend: &dyn LanguageBackend, lock: bool, format: OutputFormat) -> Result<()> {
    if lock {
        let pkgs = backend.list_lockfile()?;
        match format {
            OutputFormat::Json => output_json(&pkgs),
            OutputFormat::Text => {
                display(backend.lockfile(), pkgs.iter());
                Ok(())
            }
        }
    } else {
        let pkgs = backend.list_specfile()?;
        match format {
            OutputFormat::Json => output_json(&pkgs),
            OutputFormat::Text => {
                display(backend.specfile(), pkgs.iter());
                Ok(())
            }
        }
    }
}

fn display<'a, K, V>(file: &str, pkgs: impl ExactSizeIterator<Item = (&'a K, &'a V)>)
where
    K: Display + 'a,
    V: Display + 'a,
{
    if pkgs.len() == 0 {
        output::info(&format!("No packages listed in {}", file));
        return;
    }

    for (name, value) in pkgs {
        let value = value.to_string();
        if value.is_empty() {
            println!("{}", name);
        } else {
            println!("{} {}", name, value);
        }
    }
}
