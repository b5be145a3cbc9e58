//! # Language Backends
//!
//! One module per ecosystem, each implementing [`LanguageBackend`] against a
//! real package manager:
//!
//! - **python-poetry** (`python.rs`): `pyproject.toml` / `poetry.lock`
//! - **nodejs-yarn** (`yarn.rs`): `package.json` / `yarn.lock`
//! - **elisp-cask** (`cask.rs`): `Cask` / `packages.txt`, not reproducible
//!
//! Backends only know about their own two files and tool. Choosing between
//! them is the job of [`BackendRegistry`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use upm::config::Config;
//! use upm::packages::BackendRegistry;
//! use std::path::Path;
//!
//! let registry = BackendRegistry::with_defaults(&Config::default(), Path::new("."));
//! let backend = registry.get_backend(Some("nodejs-yarn"))?;
//! for (name, version) in backend.list_lockfile()? {
//!     println!("{} {}", name, version);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cask;
pub mod pypi_map;
pub mod python;
pub mod registry;
pub mod traits;
pub mod yarn;

pub use registry::{BackendRegistry, check_contract};
pub use traits::{LanguageBackend, Locker};
