//! Check routines
//!
//! Every routine issues a group of calls and then polls `glGetError`, which
//! must report exactly the expected code. A failed assertion is recorded and
//! the routine carries on, so one run reports every deviation at once.

use tracing::{debug, info, warn};

use crate::{
    CheckKind, CompileError, CompileResult, Diagnostic, Expectation, Failure, GlApi, GlError,
    GlVersion, GlslVersion, Report, ShaderCase, ShaderName, ShaderStage, codes,
};

/// Collects failures while running checks against one context
pub struct Checker<'a, G: GlApi + ?Sized> {
    gl: &'a G,
    report: Report,
}

impl<'a, G: GlApi + ?Sized> Checker<'a, G> {
    pub fn new(gl: &'a G) -> Self {
        Self {
            gl,
            report: Report::default(),
        }
    }

    /// Failures and driver information gathered so far
    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn finish(self) -> Report {
        self.report
    }

    fn fail(&mut self, check: CheckKind, message: impl Into<String>) {
        let message = message.into();
        warn!("{} check failed: {}", check, message);
        self.report.failures.push(Failure { check, message });
    }

    /// Poll the error slot and record a failure unless it holds `expected`
    fn expect_error(&mut self, check: CheckKind, expected: GlError, context: &str) -> bool {
        let actual = self.gl.get_error();
        if actual == expected {
            return true;
        }
        if expected == GlError::NoError {
            self.fail(check, format!("{}: {}", context, actual));
        } else {
            self.fail(
                check,
                format!("{} failed to return {}: {}", context, expected, actual),
            );
        }
        false
    }

    /// Record any error left behind by context creation or binding setup
    pub fn check_pending_errors(&mut self, limit: usize) {
        let pending = self.gl.drain_errors(limit);
        if pending.is_empty() {
            return;
        }
        let pending = pending
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        self.fail(
            CheckKind::Setup,
            format!("error pending before checks: {}", pending),
        );
    }

    /// Query the context version and texture size limit
    pub fn check_integers(&mut self, expected_major: i32, min_texture_size: i32) {
        // https://registry.khronos.org/OpenGL-Refpages/gl4/html/glGet.xhtml
        let major = self.gl.get_integer(codes::MAJOR_VERSION);
        self.report.info.major_version = Some(major);
        if major != expected_major {
            self.fail(
                CheckKind::Integers,
                format!("invalid GL_MAJOR_VERSION: {}", major),
            );
        }

        let max_texture_size = self.gl.get_integer(codes::MAX_TEXTURE_SIZE);
        self.report.info.max_texture_size = Some(max_texture_size);
        if max_texture_size < min_texture_size {
            self.fail(
                CheckKind::Integers,
                format!("invalid GL_MAX_TEXTURE_SIZE: {}", max_texture_size),
            );
        }

        self.expect_error(CheckKind::Integers, GlError::NoError, "glGetIntegerv()");
        debug!(major, max_texture_size, "integer state");
    }

    /// Query the descriptive strings, then misuse the string query once
    ///
    /// A `GL_VERSION` string below `requested_version` is only logged, since
    /// the string's format is vendor specific.
    pub fn check_strings(&mut self, requested_version: (u32, u32)) {
        // https://registry.khronos.org/OpenGL-Refpages/gl4/html/glGetString.xhtml
        let vendor = self.gl.get_string(codes::VENDOR);
        let renderer = self.gl.get_string(codes::RENDERER);
        let version = self.gl.get_string(codes::VERSION);
        let shading_language_version = self.gl.get_string(codes::SHADING_LANGUAGE_VERSION);
        self.expect_error(CheckKind::Strings, GlError::NoError, "glGetString()");

        let gl_version = version.as_deref().map(GlVersion::parse);
        let glsl_version = shading_language_version
            .as_deref()
            .and_then(GlslVersion::parse);
        if let Some(parsed) = gl_version.filter(|v| !v.satisfies(requested_version)) {
            let (major, minor) = requested_version;
            warn!(
                "GL_VERSION string reports {} but {}.{} was requested",
                parsed, major, minor
            );
        }

        info!(
            vendor = vendor.as_deref().unwrap_or_default(),
            renderer = renderer.as_deref().unwrap_or_default(),
            version = version.as_deref().unwrap_or_default(),
            glsl = shading_language_version.as_deref().unwrap_or_default(),
            "driver strings"
        );

        let info = &mut self.report.info;
        info.vendor = vendor;
        info.renderer = renderer;
        info.version = version;
        info.shading_language_version = shading_language_version;
        info.gl_version = gl_version;
        info.glsl_version = glsl_version;

        // Not a string property
        self.gl.get_string(codes::MAX_TEXTURE_SIZE);
        self.expect_error(CheckKind::Strings, GlError::InvalidEnum, "glGetString()");
    }

    /// Allocate, bind, recognize and delete one texture, then request a negative count
    pub fn check_textures(&mut self) {
        let texture = self
            .gl
            .gen_textures(1)
            .first()
            .copied()
            .unwrap_or_default();
        if texture.is_zero() {
            self.fail(CheckKind::Textures, "glGenTextures() returned zero");
        }

        // Names are not textures until first bound.
        // https://registry.khronos.org/OpenGL-Refpages/gl4/html/glIsTexture.xhtml
        self.gl.bind_texture(codes::TEXTURE_2D, texture);
        if !self.gl.is_texture(texture) {
            self.fail(
                CheckKind::Textures,
                "glIsTexture() failed to recognize a texture returned by glGenTextures()",
            );
        }

        self.gl.delete_textures(&[texture]);
        if self.gl.is_texture(texture) {
            self.fail(
                CheckKind::Textures,
                "glDeleteTextures() did not delete texture",
            );
        }

        self.expect_error(CheckKind::Textures, GlError::NoError, "texture error");

        let generated = self.gl.gen_textures(-1);
        if !generated.is_empty() {
            self.fail(
                CheckKind::Textures,
                format!("glGenTextures(-1) returned {} names", generated.len()),
            );
        }
        if self.expect_error(CheckKind::Textures, GlError::InvalidValue, "glGenTextures()") {
            self.expect_error(
                CheckKind::Textures,
                GlError::NoError,
                "error queue after glGenTextures(-1)",
            );
        }
    }

    /// Compile `source` as a `stage` shader.
    ///
    /// Returns the driver's info log as an error when compilation fails. Call
    /// sequence problems (zero name, unrecognized object, stray error) are
    /// recorded as failures regardless of the compile outcome.
    pub fn compile(&mut self, stage: ShaderStage, source: &str) -> CompileResult<()> {
        let shader = ShaderGuard::new(self.gl, self.gl.create_shader(stage.gl_kind()));
        if shader.name.is_zero() {
            self.fail(CheckKind::Shader, "glCreateShader() returned zero");
        }

        self.gl.shader_source(shader.name, source);
        self.gl.compile_shader(shader.name);
        if !self.gl.is_shader(shader.name) {
            self.fail(
                CheckKind::Shader,
                "glIsShader() failed to recognize a shader returned by glCreateShader()",
            );
        }

        self.expect_error(CheckKind::Shader, GlError::NoError, "shader error");

        if self.gl.shader_compile_status(shader.name) {
            return Ok(());
        }
        let log = self.gl.shader_info_log(shader.name);
        Err(CompileError::new(stage, source, log))
    }

    /// Compile a case and compare the outcome with its expectation
    pub fn check_shader_case(&mut self, case: &ShaderCase) {
        if let (Some(driver), Some(wanted)) = (
            self.report.info.glsl_version,
            GlslVersion::from_directive(case.source),
        ) {
            if driver < wanted {
                warn!(
                    "{} targets {} but the driver reports GLSL {}",
                    case.name,
                    wanted.directive(),
                    driver.number
                );
            }
        }

        match (self.compile(case.stage, case.source), case.expect) {
            (Ok(()), Expectation::Compiles) => debug!("{} compiled", case.name),
            (Err(err), Expectation::Compiles) => {
                self.fail(CheckKind::Shader, format!("unexpected compile error: {}", err));
            }
            (Ok(()), Expectation::Fails) => self.fail(
                CheckKind::Shader,
                format!("unexpected successful compilation of {}", case.name),
            ),
            (Err(err), Expectation::Fails) => {
                info!("{} rejected as expected:\n{}", case.name, err);
                if err.log.trim().is_empty() {
                    self.fail(
                        CheckKind::Shader,
                        format!("{} failed without an info log", case.name),
                    );
                }
                self.report.diagnostics.push(Diagnostic {
                    case: case.name.to_string(),
                    log: err.log,
                });
            }
        }
    }
}

/// Deletes the shader object when the compile check returns
struct ShaderGuard<'a, G: GlApi + ?Sized> {
    gl: &'a G,
    name: ShaderName,
}

impl<'a, G: GlApi + ?Sized> ShaderGuard<'a, G> {
    fn new(gl: &'a G, name: ShaderName) -> Self {
        Self { gl, name }
    }
}

impl<G: GlApi + ?Sized> Drop for ShaderGuard<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.name);
    }
}
