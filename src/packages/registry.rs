//! # Language Backend Registry
//!
//! Holds the ordered list of backends and resolves which one handles a
//! project.
//!
//! ## Resolution
//!
//! - An explicit name must match a registered backend exactly, otherwise
//!   resolution fails with [`UpmError::NoSuchLanguage`].
//! - Without a name, each backend's `detect()` runs in registration order and
//!   the first match wins. No match is [`UpmError::AutodetectFailed`].
//!
//! ## Adding a New Backend
//!
//! 1. Create `src/packages/<backend>.rs` with a struct implementing
//!    `LanguageBackend` (and `Locker` unless it is not reproducible)
//! 2. Add it to `BackendRegistry::with_defaults()`
//!
//! Registration order matters when two ecosystems can share a directory.

use crate::config::Config;
use crate::core::types::Operation;
use crate::error::{Result, UpmError};
use crate::packages::traits::LanguageBackend;
use crate::packages::{cask::CaskBackend, python::PoetryBackend, yarn::YarnBackend};
use crate::ui;
use std::fmt;
use std::path::Path;

/// A backend that does not satisfy the contract. Always a programming error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractViolation {
    pub backend: String,
    pub reason: String,
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "language backend {} is incomplete: {}",
            self.backend, self.reason
        )
    }
}

/// Check the parts of the contract the type system cannot: identity fields
/// are non-empty and a lock step exists iff the backend is reproducible.
pub fn check_contract(
    backend: &dyn LanguageBackend,
) -> std::result::Result<(), ContractViolation> {
    let violation = |reason: &str| ContractViolation {
        backend: backend.name().to_string(),
        reason: reason.to_string(),
    };

    if backend.name().is_empty() {
        return Err(violation("empty name"));
    }
    if backend.specfile().is_empty() {
        return Err(violation("empty specfile"));
    }
    if backend.lockfile().is_empty() {
        return Err(violation("empty lockfile"));
    }

    let has_lock = backend.locker().is_some();
    let not_reproducible = backend.quirks().is_not_reproducible();
    if has_lock == not_reproducible {
        return Err(violation(if has_lock {
            "lock is implemented but builds are marked not reproducible"
        } else {
            "lock is missing but builds are reproducible"
        }));
    }

    Ok(())
}

pub struct BackendRegistry {
    backends: Vec<Box<dyn LanguageBackend>>,
}

impl BackendRegistry {
    /// Build a registry from an ordered list of backends.
    ///
    /// # Panics
    /// If any backend violates the contract.
    pub fn new(backends: Vec<Box<dyn LanguageBackend>>) -> Self {
        for backend in &backends {
            if let Err(violation) = check_contract(backend.as_ref()) {
                panic!("{}", violation);
            }
        }
        Self { backends }
    }

    /// The built-in backends, rooted at `root`.
    pub fn with_defaults(config: &Config, root: &Path) -> Self {
        Self::new(vec![
            Box::new(PoetryBackend::new(root, config.python.clone())),
            Box::new(YarnBackend::new(root)),
            Box::new(CaskBackend::new(root, config.cask_sources.clone())),
        ])
    }

    /// Registered backend names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn LanguageBackend> + '_ {
        self.backends.iter().map(|b| &**b as &dyn LanguageBackend)
    }

    /// Resolve a backend by explicit name, or by detection when `language`
    /// is `None` or empty.
    pub fn get_backend(&self, language: Option<&str>) -> Result<&dyn LanguageBackend> {
        match language.filter(|l| !l.is_empty()) {
            Some(name) => self
                .iter()
                .find(|b| b.name() == name)
                .ok_or_else(|| UpmError::NoSuchLanguage(name.to_string())),
            None => {
                for backend in self.iter() {
                    if backend.detect() {
                        ui::verbose(&format!("detected {}", backend.name()));
                        return Ok(backend);
                    }
                }
                Err(UpmError::AutodetectFailed)
            }
        }
    }
}

/// Run the lock step, or report it as unsupported for this backend.
pub fn lock(backend: &dyn LanguageBackend) -> Result<()> {
    match backend.locker() {
        Some(locker) => locker.lock(),
        None => Err(UpmError::not_implemented(backend.name(), Operation::Lock)),
    }
}
