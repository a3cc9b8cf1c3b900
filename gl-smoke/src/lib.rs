//! OpenGL binding conformance checks
//!
//! This crate holds the driver-independent half of the smoke test: the
//! [`GlApi`] surface the checks call through, the check routines, the shader
//! sources they compile and the [`Report`] they produce. The native backend
//! lives in `gl-smoke-glow`.
//!
//! # Example
//!
//! ```rust
//! use gl_smoke::{SuiteOptions, fake::FakeDriver, run_suite};
//!
//! let gl = FakeDriver::new();
//! let report = run_suite(&gl, &SuiteOptions::default());
//! assert!(report.is_success());
//! ```

#![deny(rust_2018_idioms)]

mod api;
mod checks;
pub mod codes;
mod error;
pub mod fake;
pub mod logging;
mod report;
pub mod shaders;
mod suite;
mod versions;

pub use api::*;
pub use checks::*;
pub use codes::GlError;
pub use error::*;
pub use report::*;
pub use shaders::{Expectation, ShaderCase, ShaderStage};
pub use suite::*;
pub use versions::*;
