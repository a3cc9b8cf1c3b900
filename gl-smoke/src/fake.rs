//! In-memory driver for exercising the checks without a GPU
//!
//! [`FakeDriver`] follows the OpenGL 4.1 core rules the checks depend on:
//! generated names only become textures once bound, the error slot keeps the
//! first error until polled, invalid enums and negative counts raise the
//! matching codes. [`FakeQuirks`] switches individual rules off so the
//! failure paths can be exercised.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::{GlApi, GlError, ShaderName, TextureName, codes};

/// Deviations from conforming behavior
#[derive(Debug, Clone)]
pub struct FakeQuirks {
    pub major_version: i32,
    pub minor_version: i32,
    pub max_texture_size: i32,
    /// Error already pending before the first call
    pub stray_error: Option<GlError>,
    /// `glGetString` with a non-string enum returns null without raising an error
    pub lenient_string_query: bool,
    /// `glGenTextures` hands out zero
    pub zero_texture_names: bool,
    /// `glDeleteTextures` leaves textures alive
    pub keep_deleted_textures: bool,
    /// `glGenTextures` with a negative count raises nothing
    pub accept_negative_counts: bool,
    /// `glCreateShader` fails
    pub zero_shader_names: bool,
    /// Failed compiles leave the info log empty
    pub empty_info_log: bool,
}

impl Default for FakeQuirks {
    fn default() -> Self {
        Self {
            major_version: 4,
            minor_version: 1,
            max_texture_size: 16384,
            stray_error: None,
            lenient_string_query: false,
            zero_texture_names: false,
            keep_deleted_textures: false,
            accept_negative_counts: false,
            zero_shader_names: false,
            empty_info_log: false,
        }
    }
}

#[derive(Debug)]
struct FakeShader {
    kind: u32,
    source: String,
    compiled: Option<Result<(), String>>,
}

#[derive(Debug, Default)]
struct FakeState {
    error: Option<GlError>,
    next_name: u32,
    /// Generated but never bound
    reserved_textures: HashSet<u32>,
    textures: HashSet<u32>,
    bound_texture_2d: u32,
    shaders: HashMap<u32, FakeShader>,
}

impl FakeState {
    fn raise(&mut self, error: GlError) {
        self.error.get_or_insert(error);
    }

    fn next_name(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }
}

/// OpenGL driver model backed by plain collections
#[derive(Debug, Default)]
pub struct FakeDriver {
    quirks: FakeQuirks,
    state: RefCell<FakeState>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::with_quirks(FakeQuirks::default())
    }

    pub fn with_quirks(quirks: FakeQuirks) -> Self {
        let state = FakeState {
            error: quirks.stray_error,
            ..Default::default()
        };
        Self {
            quirks,
            state: RefCell::new(state),
        }
    }

    /// Texture objects that exist (bound at least once and not deleted)
    pub fn live_texture_count(&self) -> usize {
        self.state.borrow().textures.len()
    }

    /// Shader objects not yet deleted
    pub fn live_shader_count(&self) -> usize {
        self.state.borrow().shaders.len()
    }
}

impl GlApi for FakeDriver {
    fn get_integer(&self, pname: u32) -> i32 {
        match pname {
            codes::MAJOR_VERSION => self.quirks.major_version,
            codes::MINOR_VERSION => self.quirks.minor_version,
            codes::MAX_TEXTURE_SIZE => self.quirks.max_texture_size,
            _ => {
                self.state.borrow_mut().raise(GlError::InvalidEnum);
                0
            }
        }
    }

    fn get_string(&self, name: u32) -> Option<String> {
        let value = match name {
            codes::VENDOR => "gl-smoke".to_string(),
            codes::RENDERER => "fake driver".to_string(),
            codes::VERSION => format!(
                "{}.{}.0 Fake",
                self.quirks.major_version, self.quirks.minor_version
            ),
            codes::SHADING_LANGUAGE_VERSION => format!(
                "{}.{}0 Fake",
                self.quirks.major_version, self.quirks.minor_version
            ),
            _ => {
                if !self.quirks.lenient_string_query {
                    self.state.borrow_mut().raise(GlError::InvalidEnum);
                }
                return None;
            }
        };
        Some(value)
    }

    fn get_error(&self) -> GlError {
        self.state.borrow_mut().error.take().unwrap_or(GlError::NoError)
    }

    fn gen_textures(&self, count: i32) -> Vec<TextureName> {
        let mut state = self.state.borrow_mut();
        if count < 0 {
            if !self.quirks.accept_negative_counts {
                state.raise(GlError::InvalidValue);
            }
            return Vec::new();
        }
        (0..count)
            .map(|_| {
                if self.quirks.zero_texture_names {
                    return TextureName(0);
                }
                let name = state.next_name();
                state.reserved_textures.insert(name);
                TextureName(name)
            })
            .collect()
    }

    fn bind_texture(&self, target: u32, texture: TextureName) {
        let mut state = self.state.borrow_mut();
        if target != codes::TEXTURE_2D {
            state.raise(GlError::InvalidEnum);
            return;
        }
        let name = texture.0;
        if name != 0 && !state.textures.contains(&name) {
            // Core profile: only names from glGenTextures may be bound
            if !state.reserved_textures.remove(&name) {
                state.raise(GlError::InvalidOperation);
                return;
            }
            state.textures.insert(name);
        }
        state.bound_texture_2d = name;
    }

    fn is_texture(&self, texture: TextureName) -> bool {
        self.state.borrow().textures.contains(&texture.0)
    }

    fn delete_textures(&self, textures: &[TextureName]) {
        if self.quirks.keep_deleted_textures {
            return;
        }
        let mut state = self.state.borrow_mut();
        for texture in textures {
            state.textures.remove(&texture.0);
            state.reserved_textures.remove(&texture.0);
            if state.bound_texture_2d == texture.0 {
                state.bound_texture_2d = 0;
            }
        }
    }

    fn create_shader(&self, kind: u32) -> ShaderName {
        let mut state = self.state.borrow_mut();
        if kind != codes::VERTEX_SHADER && kind != codes::FRAGMENT_SHADER {
            state.raise(GlError::InvalidEnum);
            return ShaderName(0);
        }
        if self.quirks.zero_shader_names {
            return ShaderName(0);
        }
        let name = state.next_name();
        state.shaders.insert(
            name,
            FakeShader {
                kind,
                source: String::new(),
                compiled: None,
            },
        );
        ShaderName(name)
    }

    fn shader_source(&self, shader: ShaderName, source: &str) {
        let mut state = self.state.borrow_mut();
        match state.shaders.get_mut(&shader.0) {
            Some(object) => object.source = source.to_string(),
            None => state.raise(GlError::InvalidValue),
        }
    }

    fn compile_shader(&self, shader: ShaderName) {
        let mut state = self.state.borrow_mut();
        match state.shaders.get_mut(&shader.0) {
            Some(object) => object.compiled = Some(compile(object.kind, &object.source)),
            None => state.raise(GlError::InvalidValue),
        }
    }

    fn is_shader(&self, shader: ShaderName) -> bool {
        self.state.borrow().shaders.contains_key(&shader.0)
    }

    fn shader_compile_status(&self, shader: ShaderName) -> bool {
        let mut state = self.state.borrow_mut();
        match state.shaders.get(&shader.0) {
            Some(object) => matches!(object.compiled, Some(Ok(()))),
            None => {
                state.raise(GlError::InvalidValue);
                false
            }
        }
    }

    fn shader_info_log(&self, shader: ShaderName) -> String {
        let mut state = self.state.borrow_mut();
        match state.shaders.get(&shader.0) {
            Some(FakeShader {
                compiled: Some(Err(log)),
                ..
            }) if !self.quirks.empty_info_log => log.clone(),
            Some(_) => String::new(),
            None => {
                state.raise(GlError::InvalidValue);
                String::new()
            }
        }
    }

    fn delete_shader(&self, shader: ShaderName) {
        if shader.0 == 0 {
            return;
        }
        let mut state = self.state.borrow_mut();
        if state.shaders.remove(&shader.0).is_none() {
            state.raise(GlError::InvalidValue);
        }
    }
}

const KEYWORDS: &[&str] = &[
    "const", "in", "out", "inout", "uniform", "layout", "flat", "smooth", "precision", "highp",
    "mediump", "lowp", "return", "if", "else", "for", "while", "do", "break", "continue",
    "discard", "true", "false", "location", "core", "es",
];

const TYPES: &[&str] = &[
    "void", "bool", "int", "uint", "float", "vec2", "vec3", "vec4", "ivec2", "ivec3", "ivec4",
    "uvec2", "uvec3", "uvec4", "bvec2", "bvec3", "bvec4", "mat2", "mat3", "mat4", "sampler2D",
];

const VERTEX_BUILTINS: &[&str] = &["gl_Position", "gl_PointSize", "gl_VertexID", "gl_InstanceID"];

const FRAGMENT_BUILTINS: &[&str] = &["gl_FragCoord", "gl_FrontFacing", "gl_FragDepth"];

const FUNCTIONS: &[&str] = &[
    "texture", "normalize", "dot", "cross", "length", "mix", "clamp", "min", "max", "abs",
];

/// Rejects sources missing a `#version` directive or using undeclared identifiers
fn compile(kind: u32, source: &str) -> Result<(), String> {
    let builtins = if kind == codes::VERTEX_SHADER {
        VERTEX_BUILTINS
    } else {
        FRAGMENT_BUILTINS
    };
    let mut log = String::new();
    let mut saw_version = false;
    let mut declared: HashSet<&str> = HashSet::new();

    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = line.trim();
        if let Some(directive) = trimmed.strip_prefix('#') {
            saw_version |= directive.trim_start().starts_with("version");
            continue;
        }

        let mut previous_was_type = false;
        for word in trimmed
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .filter(|w| !w.is_empty())
        {
            let is_type = TYPES.contains(&word);
            if previous_was_type && !is_type {
                declared.insert(word);
            } else if !(is_type
                || word.starts_with(|c: char| c.is_ascii_digit())
                || KEYWORDS.contains(&word)
                || builtins.contains(&word)
                || FUNCTIONS.contains(&word)
                || declared.contains(word))
            {
                log.push_str(&format!(
                    "0:{}: error: '{}' : undeclared identifier\n",
                    line_number, word
                ));
            }
            previous_was_type = is_type;
        }
    }

    if !saw_version {
        log.insert_str(0, "0:1: error: missing #version directive\n");
    }
    if log.is_empty() { Ok(()) } else { Err(log) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaders::{
        INVALID_FRAGMENT_SHADER, INVALID_VERTEX_SHADER, VALID_FRAGMENT_SHADER, VALID_VERTEX_SHADER,
    };

    #[test]
    fn test_fake_compiler_accepts_stock_sources() {
        assert_eq!(compile(codes::VERTEX_SHADER, VALID_VERTEX_SHADER), Ok(()));
        assert_eq!(compile(codes::FRAGMENT_SHADER, VALID_FRAGMENT_SHADER), Ok(()));
    }

    #[test]
    fn test_fake_compiler_rejects_undeclared_identifiers() {
        let log = compile(codes::VERTEX_SHADER, INVALID_VERTEX_SHADER).unwrap_err();
        assert!(log.contains("'gl_Unlucky' : undeclared identifier"));
        assert!(log.contains("'vec13' : undeclared identifier"));

        let log = compile(codes::FRAGMENT_SHADER, INVALID_FRAGMENT_SHADER).unwrap_err();
        assert!(log.contains("'undeclared_color'"));

        // Vertex built-ins are not visible to fragment shaders
        let source = "#version 410\nvoid main() { gl_Position = vec4(1); }";
        assert!(compile(codes::FRAGMENT_SHADER, source).is_err());
        assert!(compile(codes::VERTEX_SHADER, "void main() {}").is_err());
    }

    #[test]
    fn test_error_slot_keeps_first_error() {
        let gl = FakeDriver::new();
        gl.get_string(codes::MAX_TEXTURE_SIZE);
        gl.gen_textures(-1);
        assert_eq!(gl.get_error(), GlError::InvalidEnum);
        assert_eq!(gl.get_error(), GlError::NoError);
    }

    #[test]
    fn test_texture_exists_only_after_bind() {
        let gl = FakeDriver::new();
        let names = gl.gen_textures(2);
        assert_eq!(names.len(), 2);
        assert!(!gl.is_texture(names[0]));
        gl.bind_texture(codes::TEXTURE_2D, names[0]);
        assert!(gl.is_texture(names[0]));
        assert!(!gl.is_texture(names[1]));
        gl.delete_textures(&names);
        assert!(!gl.is_texture(names[0]));
        assert_eq!(gl.live_texture_count(), 0);
        assert_eq!(gl.get_error(), GlError::NoError);

        // Deleted names cannot be bound again in a core context
        gl.bind_texture(codes::TEXTURE_2D, names[0]);
        assert_eq!(gl.get_error(), GlError::InvalidOperation);
    }

    #[test]
    fn test_drain_errors_stops_at_no_error() {
        let gl = FakeDriver::with_quirks(FakeQuirks {
            stray_error: Some(GlError::InvalidOperation),
            ..Default::default()
        });
        assert_eq!(gl.drain_errors(8), vec![GlError::InvalidOperation]);
        assert_eq!(gl.drain_errors(8), Vec::new());
    }
}
