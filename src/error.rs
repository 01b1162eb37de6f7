use miette::Diagnostic;
use thiserror::Error;

/// Main error type for keg operations
#[derive(Error, Diagnostic, Debug)]
pub enum KegError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(keg::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(keg::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(keg::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(keg::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl KegError {
    /// Shorthand for a validation error without help text.
    pub fn validation(message: impl Into<String>) -> Self {
        KegError::Validation {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, KegError>;
