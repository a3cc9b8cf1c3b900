//! Error types for the conformance checks

use thiserror::Error;
use tracing::debug;

use crate::ShaderStage;

/// A shader that the driver refused to compile
///
/// Displays as the shader source followed by the driver's info log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{shader_source}\n{log}")]
pub struct CompileError {
    pub stage: ShaderStage,
    pub shader_source: String,
    pub log: String,
}

impl CompileError {
    pub fn new(
        stage: ShaderStage,
        shader_source: impl Into<String>,
        log: impl Into<String>,
    ) -> Self {
        let log = log.into();
        debug!("{} shader failed to compile: {}", stage, log.trim_end());
        Self {
            stage,
            shader_source: shader_source.into(),
            log,
        }
    }
}

/// Result type for shader compilation
pub type CompileResult<T> = Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_display() {
        let err = CompileError::new(ShaderStage::Vertex, "void main() {}", "0:1: error");
        assert_eq!(err.to_string(), "void main() {}\n0:1: error");
    }
}
