//! Input validation for package names
//!
//! Names are handed to subprocesses as single arguments (never through a
//! shell) and, for some backends, written verbatim into a specfile. These
//! checks reject names that would be read as a flag or break the file.

use crate::core::types::PkgName;
use crate::error::{Result, UpmError};

/// Validate a package name before it reaches a tool or a specfile.
pub fn validate_package_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(UpmError::InvalidPackageName(
            "package name cannot be empty".to_string(),
        ));
    }

    if name.len() > 256 {
        return Err(UpmError::InvalidPackageName(format!(
            "package name too long (max 256 chars): {}...",
            name.chars().take(50).collect::<String>()
        )));
    }

    if name.starts_with('-') {
        return Err(UpmError::InvalidPackageName(format!(
            "package name cannot start with '-': {}",
            name
        )));
    }

    if name.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(UpmError::InvalidPackageName(format!(
            "package name contains whitespace or control characters: {:?}",
            name
        )));
    }

    Ok(())
}

/// Validate a list of package names
pub fn validate_package_names<'a, I>(names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a PkgName>,
{
    for name in names {
        validate_package_name(name.as_str())?;
    }
    Ok(())
}
