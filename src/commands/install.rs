use crate::error::Result;
use crate::packages::{LanguageBackend, registry};
use crate::ui as output;

pub fn lock(backend: &dyn LanguageBackend) -> Result<()> {
    registry::lock(backend)?;
    output::success(&format!("{} is up to date", backend.lockfile()));
    Ok(())
}

pub fn install(backend: &dyn LanguageBackend) -> Result<()> {
    backend.install()?;
    output::success("Dependencies installed");
    Ok(())
}
