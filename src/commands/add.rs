use crate::core::types::SpecMap;
use crate::error::Result;
use crate::packages::LanguageBackend;
use crate::ui as output;

pub fn run(backend: &dyn LanguageBackend, pkgs: &SpecMap) -> Result<()> {
    if pkgs.is_empty() {
        output::info("Nothing to add");
        return Ok(());
    }

    backend.add(pkgs)?;

    let names: Vec<&str> = pkgs.keys().map(|n| n.as_str()).collect();
    output::success(&format!("Added {} to {}", names.join(", "), backend.specfile()));
    Ok(())
}
