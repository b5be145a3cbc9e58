//! Error suggestions and helpful messages
//!
//! Provides actionable suggestions for common error scenarios

use crate::error::UpmError;
use crate::project_identity::BINARY_NAME;
use colored::Colorize;

/// Extension trait to add suggestions to errors
pub trait ErrorSuggestions {
    /// Get a helpful suggestion for this error
    fn suggestion(&self) -> Option<String>;

    /// Display the error with its suggestion
    fn display_with_suggestion(&self) -> String;
}

impl ErrorSuggestions for UpmError {
    fn suggestion(&self) -> Option<String> {
        match self {
            UpmError::NoSuchLanguage(_) => Some(format!(
                "Run '{}' to see the supported languages",
                format!("{} list-languages", BINARY_NAME).cyan()
            )),
            UpmError::AutodetectFailed => Some(format!(
                "Pick one explicitly, e.g. '{}'",
                format!("{} --lang python-poetry ...", BINARY_NAME).cyan()
            )),
            UpmError::DependencyMissing(tool) => Some(format!(
                "Install '{}' and make sure it is on your PATH",
                tool.cyan()
            )),
            UpmError::SpecfileMissing { .. } => Some(format!(
                "Nothing has been added yet; try '{}'",
                format!("{} add <package>", BINARY_NAME).cyan()
            )),
            UpmError::NotImplemented { .. } => Some(format!(
                "Select another backend with '{}'",
                "--lang".cyan()
            )),
            _ => None,
        }
    }

    fn display_with_suggestion(&self) -> String {
        match self.suggestion() {
            Some(hint) => format!("{}\n  {} {}", self, "hint:".yellow().bold(), hint),
            None => self.to_string(),
        }
    }
}
