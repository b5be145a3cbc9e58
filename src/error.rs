use std::path::PathBuf;
use thiserror::Error;

use crate::core::types::Operation;

#[derive(Error, Debug)]
pub enum UpmError {
    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parsing error in '{file}': {message}")]
    ParseError { file: String, message: String },

    #[error("{file} does not exist")]
    SpecfileMissing { file: PathBuf },

    #[error("Package manager error: {0}")]
    PackageManagerError(String),

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    #[error("System dependency missing: {0}")]
    DependencyMissing(String),

    #[error("no such language: {0}")]
    NoSuchLanguage(String),

    #[error("could not autodetect a language for your project")]
    AutodetectFailed,

    #[error("{operation} is not supported for {backend}")]
    NotImplemented {
        backend: String,
        operation: Operation,
    },

    #[error("Invalid package name: {0}")]
    InvalidPackageName(String),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
}

impl UpmError {
    pub fn not_implemented(backend: &str, operation: Operation) -> Self {
        UpmError::NotImplemented {
            backend: backend.to_string(),
            operation,
        }
    }

    /// True for operations a backend deliberately does not support, as
    /// opposed to something that went wrong.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, UpmError::NotImplemented { .. })
    }
}

pub type Result<T> = std::result::Result<T, UpmError>;
