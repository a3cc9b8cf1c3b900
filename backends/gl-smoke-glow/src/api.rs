//! `GlApi` over a glow context

use std::num::NonZeroU32;

use gl_smoke::{GlApi, GlError, ShaderName, TextureName};
use glow::{Context, HasContext};
use tracing::{trace, warn};

use crate::{GlShader, GlTexture, RawEntryPoints};

/// Forwards every check call to the native driver
pub struct GlowApi<'a> {
    gl: &'a Context,
    raw: &'a RawEntryPoints,
}

impl<'a> GlowApi<'a> {
    /// The context both arguments were loaded from must be current on this thread
    pub fn new(gl: &'a Context, raw: &'a RawEntryPoints) -> Self {
        Self { gl, raw }
    }
}

/// Zero is the default texture, which glow expresses as `None`
pub(crate) fn native_texture(name: TextureName) -> Option<GlTexture> {
    NonZeroU32::new(name.0).map(glow::NativeTexture)
}

pub(crate) fn native_shader(name: ShaderName) -> Option<GlShader> {
    NonZeroU32::new(name.0).map(glow::NativeShader)
}

impl GlApi for GlowApi<'_> {
    fn get_integer(&self, pname: u32) -> i32 {
        unsafe { self.gl.get_parameter_i32(pname) }
    }

    fn get_string(&self, name: u32) -> Option<String> {
        unsafe { self.raw.get_string(name) }
    }

    fn get_error(&self) -> GlError {
        GlError::from_raw(unsafe { self.gl.get_error() })
    }

    fn gen_textures(&self, count: i32) -> Vec<TextureName> {
        let names = unsafe { self.raw.gen_textures(count) };
        trace!(count, ?names, "glGenTextures");
        names.into_iter().map(TextureName).collect()
    }

    fn bind_texture(&self, target: u32, texture: TextureName) {
        unsafe { self.gl.bind_texture(target, native_texture(texture)) }
    }

    fn is_texture(&self, texture: TextureName) -> bool {
        match native_texture(texture) {
            Some(texture) => unsafe { self.gl.is_texture(texture) },
            None => false,
        }
    }

    fn delete_textures(&self, textures: &[TextureName]) {
        // glDeleteTextures silently ignores zero
        for texture in textures.iter().copied().filter_map(native_texture) {
            unsafe { self.gl.delete_texture(texture) }
        }
    }

    fn create_shader(&self, kind: u32) -> ShaderName {
        match unsafe { self.gl.create_shader(kind) } {
            Ok(shader) => ShaderName(shader.0.get()),
            Err(err) => {
                warn!("glCreateShader(0x{:04X}) failed: {}", kind, err);
                ShaderName(0)
            }
        }
    }

    fn shader_source(&self, shader: ShaderName, source: &str) {
        if let Some(shader) = native_shader(shader) {
            unsafe { self.gl.shader_source(shader, source) }
        }
    }

    fn compile_shader(&self, shader: ShaderName) {
        if let Some(shader) = native_shader(shader) {
            unsafe { self.gl.compile_shader(shader) }
        }
    }

    fn is_shader(&self, shader: ShaderName) -> bool {
        match native_shader(shader) {
            Some(shader) => unsafe { self.gl.is_shader(shader) },
            None => false,
        }
    }

    fn shader_compile_status(&self, shader: ShaderName) -> bool {
        match native_shader(shader) {
            Some(shader) => unsafe { self.gl.get_shader_compile_status(shader) },
            None => false,
        }
    }

    fn shader_info_log(&self, shader: ShaderName) -> String {
        match native_shader(shader) {
            Some(shader) => unsafe { self.gl.get_shader_info_log(shader) },
            None => String::new(),
        }
    }

    fn delete_shader(&self, shader: ShaderName) {
        if let Some(shader) = native_shader(shader) {
            unsafe { self.gl.delete_shader(shader) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_names_map_to_none() {
        assert_eq!(native_texture(TextureName(0)), None);
        assert_eq!(native_shader(ShaderName(0)), None);
    }

    #[test]
    fn test_names_round_trip_through_glow() {
        let texture = native_texture(TextureName(7)).unwrap();
        assert_eq!(texture.0.get(), 7);
        let shader = native_shader(ShaderName(3)).unwrap();
        assert_eq!(ShaderName(shader.0.get()), ShaderName(3));
    }
}
