//! Error types for context setup

use thiserror::Error;
use tracing::error;

/// Errors that can occur while creating the GLFW window and OpenGL context
#[derive(Error, Debug)]
pub enum ContextError {
    /// GLFW itself failed to initialize (no display, missing library)
    #[error("failed to initialize glfw: {0}")]
    Init(String),

    /// The window or its context could not be created with the requested hints
    #[error("failed to create glfw window with an OpenGL {major}.{minor} context")]
    CreateWindow { major: u32, minor: u32 },

    /// A required OpenGL entry point is missing from the driver
    #[error("failed to load OpenGL function {0}")]
    LoadFunction(&'static str),
}

impl ContextError {
    pub fn init(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        error!("GLFW initialization failed: {}", reason);
        Self::Init(reason)
    }

    pub fn create_window(major: u32, minor: u32) -> Self {
        error!("window creation failed for OpenGL {}.{}", major, minor);
        Self::CreateWindow { major, minor }
    }

    pub fn load_function(name: &'static str) -> Self {
        error!("entry point {} is not exported by the driver", name);
        Self::LoadFunction(name)
    }
}

/// Result type for context setup
pub type ContextResult<T> = Result<T, ContextError>;

/// Errors in command-line arguments
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("missing value for {0}")]
    MissingValue(&'static str),

    #[error("invalid value for {flag}: {value}")]
    InvalidValue { flag: &'static str, value: String },
}
