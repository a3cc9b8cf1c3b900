//! The driver surface exercised by the checks
//!
//! Each method forwards to exactly one OpenGL entry point. Implementations
//! must only be reachable while their context is current on the calling
//! thread.

use crate::GlError;

/// Texture object name as returned by `glGenTextures`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureName(pub u32);

/// Shader object name as returned by `glCreateShader`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShaderName(pub u32);

impl TextureName {
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl ShaderName {
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// OpenGL entry points needed by the conformance checks
pub trait GlApi {
    /// `glGetIntegerv` for a single value
    fn get_integer(&self, pname: u32) -> i32;

    /// `glGetString`; `None` when the driver returns a null pointer
    fn get_string(&self, name: u32) -> Option<String>;

    /// `glGetError`
    fn get_error(&self) -> GlError;

    /// `glGenTextures`; `count` is forwarded unchecked so invalid values reach the driver
    fn gen_textures(&self, count: i32) -> Vec<TextureName>;

    /// `glBindTexture`; the zero name unbinds
    fn bind_texture(&self, target: u32, texture: TextureName);

    /// `glIsTexture`
    fn is_texture(&self, texture: TextureName) -> bool;

    /// `glDeleteTextures`
    fn delete_textures(&self, textures: &[TextureName]);

    /// `glCreateShader`; zero on failure
    fn create_shader(&self, kind: u32) -> ShaderName;

    /// `glShaderSource` with a single string
    fn shader_source(&self, shader: ShaderName, source: &str);

    /// `glCompileShader`
    fn compile_shader(&self, shader: ShaderName);

    /// `glIsShader`
    fn is_shader(&self, shader: ShaderName) -> bool;

    /// `glGetShaderiv(GL_COMPILE_STATUS)`
    fn shader_compile_status(&self, shader: ShaderName) -> bool;

    /// `glGetShaderInfoLog`
    fn shader_info_log(&self, shader: ShaderName) -> String;

    /// `glDeleteShader`
    fn delete_shader(&self, shader: ShaderName);

    /// Poll `glGetError` until it reports no error, returning what was pending.
    ///
    /// Stops after `limit` polls; a lost context keeps reporting errors forever.
    fn drain_errors(&self, limit: usize) -> Vec<GlError> {
        let mut pending = Vec::new();
        for _ in 0..limit {
            match self.get_error() {
                GlError::NoError => break,
                error => pending.push(error),
            }
        }
        pending
    }
}
