use crate::core::types::{LockMap, NameSet, PkgInfo, PkgName, Quirks, SpecMap};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Recomputes a lockfile from the specfile.
///
/// Kept separate from [`LanguageBackend`] because only reproducible
/// ecosystems have a meaningful lock step.
pub trait Locker {
    fn lock(&self) -> Result<()>;
}

/// One ecosystem's implementation of the uniform verb set.
///
/// Operations a tool cannot support return
/// [`UpmError::NotImplemented`](crate::error::UpmError::NotImplemented).
pub trait LanguageBackend {
    fn name(&self) -> &str;

    /// Specfile name, relative to the project root.
    fn specfile(&self) -> &str;

    /// Lockfile name, relative to the project root.
    fn lockfile(&self) -> &str;

    fn quirks(&self) -> Quirks;

    /// Directory the backend reads, writes and runs tools in.
    fn root(&self) -> &Path;

    fn specfile_path(&self) -> PathBuf {
        self.root().join(self.specfile())
    }

    fn lockfile_path(&self) -> PathBuf {
        self.root().join(self.lockfile())
    }

    /// Whether the project root belongs to this ecosystem. Never writes,
    /// prompts, or looks at the lockfile.
    fn detect(&self) -> bool;

    fn search(&self, queries: &[String]) -> Result<Vec<PkgInfo>>;

    /// `Ok(None)` when the package does not exist upstream.
    fn info(&self, name: &PkgName) -> Result<Option<PkgInfo>>;

    fn add(&self, pkgs: &SpecMap) -> Result<()>;

    /// Fails if the specfile does not exist.
    fn remove(&self, pkgs: &NameSet) -> Result<()>;

    /// `None` exactly when [`Quirks::NOT_REPRODUCIBLE`] is set.
    fn locker(&self) -> Option<&dyn Locker>;

    fn install(&self) -> Result<()>;

    fn list_specfile(&self) -> Result<SpecMap>;

    fn list_lockfile(&self) -> Result<LockMap>;

    fn guess(&self) -> Result<NameSet>;
}
