//! Hidden GLFW window owning the OpenGL context under test

use std::ffi::c_void;

use glfw::{Context as _, OpenGlProfileHint, WindowHint, WindowMode};
use tracing::{debug, error, info};

use crate::{ContextError, ContextResult, GlowApi, RawEntryPoints};

/// Window and context creation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContextConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub visible: bool,
    /// Requested context version (major, minor)
    pub version: (u32, u32),
    /// Required for 3.2+ core contexts on macOS
    pub forward_compatible: bool,
    pub core_profile: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Test".to_string(),
            visible: false,
            version: (4, 1),
            forward_compatible: true,
            core_profile: true,
        }
    }
}

impl ContextConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_version(mut self, major: u32, minor: u32) -> Self {
        self.version = (major, minor);
        self
    }

    fn window_hints(&self) -> Vec<WindowHint> {
        let (major, minor) = self.version;
        let profile = if self.core_profile {
            OpenGlProfileHint::Core
        } else {
            OpenGlProfileHint::Any
        };
        // https://www.glfw.org/faq.html#41---how-do-i-create-an-opengl-30-context
        vec![
            WindowHint::Visible(self.visible),
            WindowHint::ContextVersion(major, minor),
            WindowHint::OpenGlForwardCompat(self.forward_compatible),
            WindowHint::OpenGlProfile(profile),
        ]
    }
}

/// A GLFW window whose OpenGL context is current on the creating thread
///
/// GLFW handles are `!Send`, so the context cannot leave that thread. Dropping
/// releases the context before the window is destroyed and GLFW terminates.
pub struct HeadlessContext {
    gl: glow::Context,
    raw: RawEntryPoints,
    config: ContextConfig,
    window: glfw::PWindow,
    _events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    _glfw: glfw::Glfw,
}

impl HeadlessContext {
    /// Initialize GLFW, create the window, make its context current and load OpenGL
    pub fn create(config: &ContextConfig) -> ContextResult<Self> {
        let mut glfw = glfw::init(|err: glfw::Error, description: String| {
            error!("GLFW error {:?}: {}", err, description);
        })
        .map_err(|err| ContextError::init(format!("{:?}", err)))?;

        for hint in config.window_hints() {
            glfw.window_hint(hint);
        }

        let (major, minor) = config.version;
        let (mut window, events) = glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                WindowMode::Windowed,
            )
            .ok_or_else(|| ContextError::create_window(major, minor))?;
        window.make_current();

        let gl = unsafe {
            glow::Context::from_loader_function(|name| {
                window.get_proc_address(name) as *const c_void
            })
        };
        let raw = unsafe {
            RawEntryPoints::load(|name| window.get_proc_address(name) as *const c_void)?
        };
        info!(
            "created {}x{} window with an OpenGL {}.{} context",
            config.width, config.height, major, minor
        );

        Ok(Self {
            gl,
            raw,
            config: config.clone(),
            window,
            _events: events,
            _glfw: glfw,
        })
    }

    /// The checked OpenGL surface for this context
    pub fn api(&self) -> GlowApi<'_> {
        GlowApi::new(&self.gl, &self.raw)
    }

    /// Parameters the context was created with
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn is_current(&self) -> bool {
        self.window.is_current()
    }
}

impl Drop for HeadlessContext {
    fn drop(&mut self) {
        glfw::make_context_current(None);
        debug!("released OpenGL context");
    }
}
