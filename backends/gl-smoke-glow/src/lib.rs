//! Native backend for the OpenGL conformance checks
//!
//! Creates a hidden GLFW window with an OpenGL 4.1 core context, loads the
//! driver through [`glow`] and implements [`gl_smoke::GlApi`] on top of it.
//!
//! # Example
//!
//! ```rust,no_run
//! use gl_smoke::{SuiteOptions, run_suite};
//! use gl_smoke_glow::{ContextConfig, HeadlessContext};
//!
//! let context = HeadlessContext::create(&ContextConfig::default())?;
//! let report = run_suite(&context.api(), &SuiteOptions::default());
//! println!("{report}");
//! # Ok::<(), gl_smoke_glow::ContextError>(())
//! ```

// Re-export glow and glfw so callers link the same versions.
pub use glfw;
pub use glow;
use glow::{Context, HasContext};

mod api;
pub mod cli;
mod context;
mod error;
mod raw;

pub use api::*;
pub use context::*;
pub use error::*;
pub use raw::*;

/// Environment variable that turns a missing display into a test failure
pub const REQUIRE_CONTEXT_ENV: &str = "GL_SMOKE_REQUIRE_CONTEXT";

pub type GlTexture = <Context as HasContext>::Texture;
pub type GlShader = <Context as HasContext>::Shader;
