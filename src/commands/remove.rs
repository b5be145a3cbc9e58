use crate::core::types::NameSet;
use crate::error::Result;
use crate::packages::LanguageBackend;
use crate::ui as output;

pub fn run(backend: &dyn LanguageBackend, pkgs: &NameSet) -> Result<()> {
    if pkgs.is_empty() {
        output::info("Nothing to remove");
        return Ok(());
    }

    backend.remove(pkgs)?;

    let names: Vec<&str> = pkgs.iter().map(|n| n.as_str()).collect();
    output::success(&format!("Removed {} from {}", names.join(", "), backend.specfile()));
    Ok(())
}
