//! The checks must issue driver calls in the order the OpenGL rules require

use std::cell::RefCell;

use gl_smoke::fake::FakeDriver;
use gl_smoke::{GlApi, GlError, ShaderName, SuiteOptions, TextureName, run_suite};
use pretty_assertions::assert_eq;

/// Wraps a driver and records the entry point name of every call
struct Recorder<G> {
    inner: G,
    calls: RefCell<Vec<&'static str>>,
}

impl<G> Recorder<G> {
    fn new(inner: G) -> Self {
        Self {
            inner,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn record(&self, call: &'static str) {
        self.calls.borrow_mut().push(call);
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }
}

impl<G: GlApi> GlApi for Recorder<G> {
    fn get_integer(&self, pname: u32) -> i32 {
        self.record("glGetIntegerv");
        self.inner.get_integer(pname)
    }

    fn get_string(&self, name: u32) -> Option<String> {
        self.record("glGetString");
        self.inner.get_string(name)
    }

    fn get_error(&self) -> GlError {
        self.record("glGetError");
        self.inner.get_error()
    }

    fn gen_textures(&self, count: i32) -> Vec<TextureName> {
        self.record("glGenTextures");
        self.inner.gen_textures(count)
    }

    fn bind_texture(&self, target: u32, texture: TextureName) {
        self.record("glBindTexture");
        self.inner.bind_texture(target, texture)
    }

    fn is_texture(&self, texture: TextureName) -> bool {
        self.record("glIsTexture");
        self.inner.is_texture(texture)
    }

    fn delete_textures(&self, textures: &[TextureName]) {
        self.record("glDeleteTextures");
        self.inner.delete_textures(textures)
    }

    fn create_shader(&self, kind: u32) -> ShaderName {
        self.record("glCreateShader");
        self.inner.create_shader(kind)
    }

    fn shader_source(&self, shader: ShaderName, source: &str) {
        self.record("glShaderSource");
        self.inner.shader_source(shader, source)
    }

    fn compile_shader(&self, shader: ShaderName) {
        self.record("glCompileShader");
        self.inner.compile_shader(shader)
    }

    fn is_shader(&self, shader: ShaderName) -> bool {
        self.record("glIsShader");
        self.inner.is_shader(shader)
    }

    fn shader_compile_status(&self, shader: ShaderName) -> bool {
        self.record("glGetShaderiv");
        self.inner.shader_compile_status(shader)
    }

    fn shader_info_log(&self, shader: ShaderName) -> String {
        self.record("glGetShaderInfoLog");
        self.inner.shader_info_log(shader)
    }

    fn delete_shader(&self, shader: ShaderName) {
        self.record("glDeleteShader");
        self.inner.delete_shader(shader)
    }
}

#[test]
fn stock_suite_call_sequence() {
    let gl = Recorder::new(FakeDriver::new());
    let report = run_suite(&gl, &SuiteOptions::default());
    assert!(report.is_success(), "{report}");

    let expected = vec![
        // drain
        "glGetError",
        // integers
        "glGetIntegerv",
        "glGetIntegerv",
        "glGetError",
        // strings
        "glGetString",
        "glGetString",
        "glGetString",
        "glGetString",
        "glGetError",
        "glGetString",
        "glGetError",
        // textures
        "glGenTextures",
        "glBindTexture",
        "glIsTexture",
        "glDeleteTextures",
        "glIsTexture",
        "glGetError",
        "glGenTextures",
        "glGetError",
        "glGetError",
        // valid shader
        "glCreateShader",
        "glShaderSource",
        "glCompileShader",
        "glIsShader",
        "glGetError",
        "glGetShaderiv",
        "glDeleteShader",
        // invalid shader
        "glCreateShader",
        "glShaderSource",
        "glCompileShader",
        "glIsShader",
        "glGetError",
        "glGetShaderiv",
        "glGetShaderInfoLog",
        "glDeleteShader",
    ];
    assert_eq!(gl.calls(), expected);
}

#[test]
fn failed_run_still_releases_shaders() {
    let gl = Recorder::new(FakeDriver::new());
    let options = SuiteOptions::default().with_expected_major(5);
    let report = run_suite(&gl, &options);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].message, "invalid GL_MAJOR_VERSION: 4");
    assert_eq!(gl.inner.live_shader_count(), 0);
    assert_eq!(
        gl.calls().iter().filter(|c| **c == "glDeleteShader").count(),
        2
    );
}
