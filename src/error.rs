use miette::Diagnostic;
use thiserror::Error;

/// Main error type for msdf operations
#[derive(Error, Diagnostic, Debug)]
pub enum MsdfError {
    #[error("IO error: {0}")]
    #[diagnostic(code(msdf::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(msdf::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(msdf::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid shape: {message}")]
    #[diagnostic(code(msdf::shape))]
    InvalidShape {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(msdf::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Render error: {message}")]
    #[diagnostic(code(msdf::render))]
    Render {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl MsdfError {
    /// Shorthand for a configuration error without help text.
    pub fn config(message: impl Into<String>) -> Self {
        MsdfError::Config {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MsdfError>;
