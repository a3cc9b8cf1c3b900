//! OpenGL error codes and the enum values the checks query
//!
//! Values come from the OpenGL registry (`gl.xml`).

use std::fmt;

pub const NO_ERROR: u32 = 0;
pub const INVALID_ENUM: u32 = 0x0500;
pub const INVALID_VALUE: u32 = 0x0501;
pub const INVALID_OPERATION: u32 = 0x0502;
pub const STACK_OVERFLOW: u32 = 0x0503;
pub const STACK_UNDERFLOW: u32 = 0x0504;
pub const OUT_OF_MEMORY: u32 = 0x0505;
pub const INVALID_FRAMEBUFFER_OPERATION: u32 = 0x0506;
pub const CONTEXT_LOST: u32 = 0x0507;

pub const VENDOR: u32 = 0x1F00;
pub const RENDERER: u32 = 0x1F01;
pub const VERSION: u32 = 0x1F02;
pub const SHADING_LANGUAGE_VERSION: u32 = 0x8B8C;
pub const MAJOR_VERSION: u32 = 0x821B;
pub const MINOR_VERSION: u32 = 0x821C;
pub const MAX_TEXTURE_SIZE: u32 = 0x0D33;

pub const TEXTURE_2D: u32 = 0x0DE1;
pub const VERTEX_SHADER: u32 = 0x8B31;
pub const FRAGMENT_SHADER: u32 = 0x8B30;

/// Error code reported by `glGetError`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlError {
    NoError,
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    StackOverflow,
    StackUnderflow,
    OutOfMemory,
    InvalidFramebufferOperation,
    ContextLost,
    /// A value outside the registry's error list
    Unknown(u32),
}

impl GlError {
    /// Map a raw `glGetError` value
    pub fn from_raw(code: u32) -> Self {
        match code {
            NO_ERROR => Self::NoError,
            INVALID_ENUM => Self::InvalidEnum,
            INVALID_VALUE => Self::InvalidValue,
            INVALID_OPERATION => Self::InvalidOperation,
            STACK_OVERFLOW => Self::StackOverflow,
            STACK_UNDERFLOW => Self::StackUnderflow,
            OUT_OF_MEMORY => Self::OutOfMemory,
            INVALID_FRAMEBUFFER_OPERATION => Self::InvalidFramebufferOperation,
            CONTEXT_LOST => Self::ContextLost,
            other => Self::Unknown(other),
        }
    }

    /// The raw value the driver would report
    pub fn raw(self) -> u32 {
        match self {
            Self::NoError => NO_ERROR,
            Self::InvalidEnum => INVALID_ENUM,
            Self::InvalidValue => INVALID_VALUE,
            Self::InvalidOperation => INVALID_OPERATION,
            Self::StackOverflow => STACK_OVERFLOW,
            Self::StackUnderflow => STACK_UNDERFLOW,
            Self::OutOfMemory => OUT_OF_MEMORY,
            Self::InvalidFramebufferOperation => INVALID_FRAMEBUFFER_OPERATION,
            Self::ContextLost => CONTEXT_LOST,
            Self::Unknown(code) => code,
        }
    }

    pub fn is_error(self) -> bool {
        self != Self::NoError
    }

    /// Registry name, e.g. `GL_INVALID_ENUM`
    pub fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::NoError => "GL_NO_ERROR",
            Self::InvalidEnum => "GL_INVALID_ENUM",
            Self::InvalidValue => "GL_INVALID_VALUE",
            Self::InvalidOperation => "GL_INVALID_OPERATION",
            Self::StackOverflow => "GL_STACK_OVERFLOW",
            Self::StackUnderflow => "GL_STACK_UNDERFLOW",
            Self::OutOfMemory => "GL_OUT_OF_MEMORY",
            Self::InvalidFramebufferOperation => "GL_INVALID_FRAMEBUFFER_OPERATION",
            Self::ContextLost => "GL_CONTEXT_LOST",
            Self::Unknown(_) => return None,
        })
    }
}

impl From<u32> for GlError {
    fn from(code: u32) -> Self {
        Self::from_raw(code)
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (0x{:04X})", name, self.raw()),
            None => write!(f, "unknown GL error 0x{:04X}", self.raw()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_codes_map_both_ways() {
        let codes = std::iter::once(NO_ERROR).chain(INVALID_ENUM..=CONTEXT_LOST);
        for code in codes {
            let error = GlError::from_raw(code);
            assert!(!matches!(error, GlError::Unknown(_)), "0x{code:04X}");
            assert_eq!(error.raw(), code);
        }
    }

    #[test]
    fn test_unknown_code_is_preserved() {
        let error = GlError::from(0x9999);
        assert_eq!(error, GlError::Unknown(0x9999));
        assert!(error.is_error());
        assert_eq!(error.to_string(), "unknown GL error 0x9999");
    }

    #[test]
    fn test_display_uses_registry_name() {
        assert_eq!(GlError::InvalidEnum.to_string(), "GL_INVALID_ENUM (0x0500)");
        assert_eq!(GlError::NoError.to_string(), "GL_NO_ERROR (0x0000)");
        assert!(!GlError::NoError.is_error());
    }
}
