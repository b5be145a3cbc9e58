use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::BitOr;

// Identifiers are kept as distinct string wrappers so a version can never be
// passed where a spec is expected.
macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_newtype!(
    /// Name of a package in its ecosystem's namespace.
    PkgName
);
string_newtype!(
    /// Version constraint as written by the user. Empty means "any".
    PkgSpec
);
string_newtype!(
    /// Concrete version pinned in a lockfile.
    PkgVersion
);

/// Declared dependencies, as read from a specfile.
pub type SpecMap = BTreeMap<PkgName, PkgSpec>;
/// Resolved dependencies, as read from a lockfile.
pub type LockMap = BTreeMap<PkgName, PkgVersion>;
pub type NameSet = BTreeSet<PkgName>;

/// Package metadata returned by search and info.
///
/// Every field is best-effort: missing data is an empty string or list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PkgInfo {
    pub name: String,
    pub description: String,
    pub version: String,
    pub homepage_url: String,
    pub documentation_url: String,
    pub source_code_url: String,
    pub bug_tracker_url: String,
    pub author: String,
    pub license: String,
    pub dependencies: Vec<String>,
}

/// Capability limitations of a backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quirks(u8);

impl Quirks {
    pub const NONE: Quirks = Quirks(0);
    /// The tool has no deterministic re-lock step, so `lock` must be absent.
    pub const NOT_REPRODUCIBLE: Quirks = Quirks(1);

    pub fn contains(self, other: Quirks) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_not_reproducible(self) -> bool {
        self.contains(Quirks::NOT_REPRODUCIBLE)
    }
}

impl BitOr for Quirks {
    type Output = Quirks;

    fn bitor(self, rhs: Quirks) -> Quirks {
        Quirks(self.0 | rhs.0)
    }
}

/// The operations every backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Detect,
    Search,
    Info,
    Add,
    Remove,
    Lock,
    Install,
    ListSpecfile,
    ListLockfile,
    Guess,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Detect => "detect",
            Self::Search => "search",
            Self::Info => "info",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Lock => "lock",
            Self::Install => "install",
            Self::ListSpecfile => "list-specfile",
            Self::ListLockfile => "list-lockfile",
            Self::Guess => "guess",
        };
        f.write_str(name)
    }
}
